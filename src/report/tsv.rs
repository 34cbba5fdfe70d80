use std::path::Path;

use crate::pipeline::stage2_diff::DiffTable;
use crate::report::ReportError;

pub fn write_diff_tsv(table: &DiffTable, path: &Path) -> Result<(), ReportError> {
    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    w.write_record([
        "sample",
        "prediction_reference_pipeline",
        "prediction_updated_pipeline",
    ])?;
    for row in &table.rows {
        w.write_record([&row.sample, &row.reference, &row.updated])?;
    }
    w.flush()?;
    Ok(())
}
