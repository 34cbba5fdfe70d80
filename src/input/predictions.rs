use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::input::reader::{column_index, csv_error, delimited_reader, field, line_of, read_headers};
use crate::model::profile::PredictionLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRecord {
    pub sample: String,
    pub best_hit: String,
    pub identity: String,
    pub coverage: String,
    pub depth: String,
}

impl PredictionRecord {
    /// `NAME (id: X, cov: Y, depth: Z)`
    pub fn annotated(&self) -> String {
        format!(
            "{} (id: {}, cov: {}, depth: {})",
            self.best_hit, self.identity, self.coverage, self.depth
        )
    }
}

#[derive(Debug, Clone)]
pub struct PredictionTable {
    pub path: PathBuf,
    pub records: Vec<PredictionRecord>,
    by_sample: BTreeMap<String, Vec<usize>>,
}

impl PredictionTable {
    pub fn from_records(path: PathBuf, records: Vec<PredictionRecord>) -> Self {
        let mut by_sample: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, rec) in records.iter().enumerate() {
            by_sample.entry(rec.sample.clone()).or_default().push(idx);
        }
        Self {
            path,
            records,
            by_sample,
        }
    }

    /// Rows for a sample in file order; empty when the sample has no calls.
    pub fn rows_for(&self, sample: &str) -> Vec<&PredictionRecord> {
        self.by_sample
            .get(sample)
            .map(|idxs| idxs.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    pub fn labels_for(&self, sample: &str) -> Vec<&str> {
        self.rows_for(sample)
            .into_iter()
            .map(|r| r.best_hit.as_str())
            .collect()
    }

    pub fn contains_sample(&self, sample: &str) -> bool {
        self.by_sample.contains_key(sample)
    }

    /// Distinct sample IDs, byte-wise sorted.
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.by_sample.keys().map(String::as_str)
    }
}

pub fn load_predictions(
    path: &Path,
    layout: &PredictionLayout,
) -> Result<PredictionTable, InputError> {
    let mut reader = delimited_reader(path, b'\t')?;
    let headers = read_headers(&mut reader, path)?;
    let sample_col = column_index(&headers, &layout.sample_column, path)?;
    let hit_col = column_index(&headers, &layout.best_hit_column, path)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e))?;
        let sample = field(&row, sample_col, path)?;
        let best_hit = field(&row, hit_col, path)?;
        if best_hit.is_empty() {
            tracing::warn!(
                "empty {} for sample {} (line {}); skipping",
                layout.best_hit_column,
                sample,
                line_of(&row)
            );
            skipped += 1;
            continue;
        }
        records.push(PredictionRecord {
            sample: sample.to_string(),
            best_hit: best_hit.to_string(),
            identity: field(&row, layout.identity_index, path)?.to_string(),
            coverage: field(&row, layout.coverage_index, path)?.to_string(),
            depth: field(&row, layout.depth_index, path)?.to_string(),
        });
    }

    let table = PredictionTable::from_records(path.to_path_buf(), records);
    tracing::debug!(
        "loaded predictions: path={}, rows={}, samples={}, skipped={}",
        path.display(),
        table.records.len(),
        table.by_sample.len(),
        skipped
    );
    Ok(table)
}
