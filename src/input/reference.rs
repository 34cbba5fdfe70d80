use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::input::reader::{column_index, csv_error, delimited_reader, field, line_of, read_headers};
use crate::model::outcome::Phenotype;
use crate::model::profile::ReferenceLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub strain_id: String,
    pub microarray_families: Vec<String>,
    pub phenotype: Phenotype,
}

#[derive(Debug, Clone)]
pub struct ReferenceTable {
    pub path: PathBuf,
    pub records: Vec<ReferenceRecord>,
}

impl ReferenceTable {
    pub fn n_positive(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.phenotype == Phenotype::Positive)
            .count()
    }

    pub fn n_negative(&self) -> usize {
        self.records.len() - self.n_positive()
    }
}

pub fn parse_microarray_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn load_reference(path: &Path, layout: &ReferenceLayout) -> Result<ReferenceTable, InputError> {
    let mut reader = delimited_reader(path, b'\t')?;
    let headers = read_headers(&mut reader, path)?;
    let strain_col = column_index(&headers, &layout.strain_column, path)?;

    let mut records = Vec::new();
    let mut seen = BTreeSet::new();
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e))?;
        let line = line_of(&row);
        let strain_id = field(&row, strain_col, path)?;
        if strain_id.is_empty() {
            return Err(InputError::Parse(format!(
                "{} line {} has an empty {}",
                path.display(),
                line,
                layout.strain_column
            )));
        }
        if !seen.insert(strain_id.to_string()) {
            return Err(InputError::Parse(format!(
                "{} line {}: duplicate strain {}",
                path.display(),
                line,
                strain_id
            )));
        }
        let raw_pheno = field(&row, layout.phenotype_index, path)?;
        let phenotype = Phenotype::parse(raw_pheno).ok_or_else(|| {
            InputError::Parse(format!(
                "{} line {}: phenotype must be POS or NEG, got '{}'",
                path.display(),
                line,
                raw_pheno
            ))
        })?;
        let microarray_families =
            parse_microarray_list(field(&row, layout.microarray_index, path)?);
        records.push(ReferenceRecord {
            strain_id: strain_id.to_string(),
            microarray_families,
            phenotype,
        });
    }

    if records.is_empty() {
        return Err(InputError::Parse(format!(
            "reference table {} has no samples",
            path.display()
        )));
    }

    let table = ReferenceTable {
        path: path.to_path_buf(),
        records,
    };
    tracing::info!(
        "loaded reference: path={}, samples={}, positive={}, negative={}",
        path.display(),
        table.records.len(),
        table.n_positive(),
        table.n_negative()
    );
    Ok(table)
}
