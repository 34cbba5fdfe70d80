use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Header-aware reader over a delimited file. Rows may vary in width; short
/// rows are reported when a positional column is requested.
pub fn delimited_reader(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn BufRead>>, InputError> {
    let inner = open_maybe_gz(path)?;
    Ok(ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(inner))
}

pub fn read_headers(
    reader: &mut csv::Reader<Box<dyn BufRead>>,
    path: &Path,
) -> Result<StringRecord, InputError> {
    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(InputError::Parse(format!(
            "{} has no header row",
            path.display()
        )));
    }
    Ok(headers)
}

pub fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize, InputError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            InputError::Parse(format!(
                "{} is missing column '{}'",
                path.display(),
                name
            ))
        })
}

pub fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    path: &Path,
) -> Result<&'r str, InputError> {
    record.get(idx).map(str::trim).ok_or_else(|| {
        InputError::Parse(format!(
            "{} line {} has no column {} ({} columns)",
            path.display(),
            line_of(record),
            idx,
            record.len()
        ))
    })
}

pub fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

pub fn csv_error(path: &Path, source: csv::Error) -> InputError {
    InputError::Csv {
        path: path.display().to_string(),
        source,
    }
}
