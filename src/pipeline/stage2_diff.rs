use std::collections::BTreeSet;

use crate::input::{PredictionRecord, PredictionTable};

pub const AGREEMENT_MARKER: &str = "✓";
pub const EMPTY_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub sample: String,
    pub reference: String,
    pub updated: String,
}

impl DiffRow {
    pub fn is_agreement(&self) -> bool {
        self.reference == AGREEMENT_MARKER && self.updated == AGREEMENT_MARKER
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffTable {
    pub rows: Vec<DiffRow>,
}

impl DiffTable {
    pub fn n_agreements(&self) -> usize {
        self.rows.iter().filter(|r| r.is_agreement()).count()
    }
}

/// One row per sample of `reference`, sorted; each side lists the labels the
/// other side lacks.
pub fn build_diff_table(reference: &PredictionTable, updated: &PredictionTable) -> DiffTable {
    let extra: Vec<&str> = updated
        .samples()
        .filter(|s| !reference.contains_sample(s))
        .collect();
    if !extra.is_empty() {
        tracing::warn!(
            "{} sample(s) only in {} are not tabulated: {}",
            extra.len(),
            updated.path.display(),
            extra.join(", ")
        );
    }

    let rows = reference
        .samples()
        .map(|sample| {
            let ref_rows = reference.rows_for(sample);
            let new_rows = updated.rows_for(sample);
            let ref_cell = exclusive_cell(&ref_rows, &new_rows);
            let new_cell = exclusive_cell(&new_rows, &ref_rows);
            if ref_cell == new_cell {
                DiffRow {
                    sample: sample.to_string(),
                    reference: AGREEMENT_MARKER.to_string(),
                    updated: AGREEMENT_MARKER.to_string(),
                }
            } else {
                DiffRow {
                    sample: sample.to_string(),
                    reference: ref_cell,
                    updated: new_cell,
                }
            }
        })
        .collect();

    DiffTable { rows }
}

fn exclusive_cell(side: &[&PredictionRecord], other: &[&PredictionRecord]) -> String {
    let other_labels: BTreeSet<&str> = other.iter().map(|r| r.best_hit.as_str()).collect();
    let exclusive: BTreeSet<&str> = side
        .iter()
        .map(|r| r.best_hit.as_str())
        .filter(|label| !other_labels.contains(label))
        .collect();
    if exclusive.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    exclusive
        .into_iter()
        .filter_map(|label| side.iter().find(|r| r.best_hit == label))
        .map(|r| r.annotated())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_diff.rs"]
mod tests;
