use std::path::Path;

pub mod predictions;
pub mod reader;
pub mod reference;

pub use predictions::{PredictionRecord, PredictionTable, load_predictions};
pub use reference::{ReferenceRecord, ReferenceTable, load_reference};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("TSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub fn require_file(path: &Path) -> Result<(), InputError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InputError::MissingInput(format!(
            "file does not exist: {}",
            path.display()
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
