use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook, XlsxError};

use crate::input::reader::{csv_error, delimited_reader, read_headers};
use crate::input::{InputError, require_file};

pub const MAX_SHEET_NAME_CHARS: usize = 31;
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("table too large for a worksheet: {0}")]
    TooLarge(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub rows: usize,
    pub columns: usize,
}

/// `{software}_{sample}`, made acceptable to Excel.
pub fn sheet_name(software: &str, sample: &str) -> String {
    let raw = format!("{software}_{sample}");
    let mut name: String = raw
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    name = name.trim_matches('\'').to_string();
    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        name = name.chars().take(MAX_SHEET_NAME_CHARS).collect();
    }
    if name.is_empty() {
        name = "Sheet1".to_string();
    }
    if name != raw {
        tracing::warn!("sheet name '{}' adjusted to '{}'", raw, name);
    }
    name
}

pub fn convert_csv_to_xlsx(
    input: &Path,
    output: &Path,
    sheet: &str,
    delimiter: u8,
) -> Result<ConvertStats, ConvertError> {
    require_file(input)?;
    let mut reader = delimited_reader(input, delimiter)?;
    let headers = read_headers(&mut reader, input)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    for (col, name) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(col)?, name, &header_format)?;
    }

    let mut rows = 0usize;
    let mut columns = headers.len();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(input, e))?;
        rows += 1;
        let row = u32::try_from(rows)
            .map_err(|_| ConvertError::TooLarge(format!("{rows} rows")))?;
        columns = columns.max(record.len());
        for (col, cell) in record.iter().enumerate() {
            let col = column_number(col)?;
            match classify_cell(cell) {
                CellValue::Blank => {}
                CellValue::Number(v) => {
                    worksheet.write_number(row, col, v)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
            }
        }
    }

    workbook.save(output)?;
    tracing::info!(
        "wrote {} (sheet {}, {} rows, {} columns)",
        output.display(),
        sheet,
        rows,
        columns
    );
    Ok(ConvertStats { rows, columns })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Blank,
    Number(f64),
    Text(&'a str),
}

pub fn classify_cell(raw: &str) -> CellValue<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Blank;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => CellValue::Number(v),
        _ => CellValue::Text(raw),
    }
}

fn column_number(col: usize) -> Result<u16, ConvertError> {
    u16::try_from(col).map_err(|_| ConvertError::TooLarge(format!("{} columns", col + 1)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/convert/tests.rs"]
mod tests;
