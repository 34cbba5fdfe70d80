use serde::Serialize;

use crate::families::{any_label_contains, matched_families};
use crate::input::{PredictionTable, ReferenceTable};
use crate::model::outcome::{ConfusionCounts, Outcome, Phenotype};
use crate::model::rate::Rate;

#[derive(Debug, Clone, Copy)]
pub struct ScoreParams<'a> {
    pub carbapenemase_families: &'a [String],
    pub concordance_denominator: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleScore {
    pub strain_id: String,
    pub phenotype: Phenotype,
    pub outcome: Outcome,
    pub carbapenemase_families: Vec<String>,
    pub microarray_found: Vec<String>,
    pub microarray_missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunScore {
    pub sensitivity: Rate,
    pub specificity: Rate,
    pub microarray_sensitivity: Rate,
    pub counts: ConfusionCounts,
    pub microarray_matched: u32,
    pub concordance_denominator: u32,
    pub samples: Vec<SampleScore>,
}

pub fn score_run(
    reference: &ReferenceTable,
    predictions: &PredictionTable,
    params: &ScoreParams<'_>,
) -> RunScore {
    let mut counts = ConfusionCounts::default();
    let mut microarray_matched = 0u32;
    let mut samples = Vec::with_capacity(reference.records.len());

    for rec in &reference.records {
        if !predictions.contains_sample(&rec.strain_id) {
            tracing::debug!(
                "sample {} has no calls in {}",
                rec.strain_id,
                predictions.path.display()
            );
        }
        let labels = predictions.labels_for(&rec.strain_id);

        let carba = matched_families(params.carbapenemase_families, &labels);
        let outcome = Outcome::classify(!carba.is_empty(), rec.phenotype);
        counts.record(outcome);

        let mut found = Vec::new();
        let mut missing = Vec::new();
        for family in &rec.microarray_families {
            if any_label_contains(&labels, family) {
                microarray_matched += 1;
                found.push(family.clone());
            } else {
                missing.push(family.clone());
            }
        }

        samples.push(SampleScore {
            strain_id: rec.strain_id.clone(),
            phenotype: rec.phenotype,
            outcome,
            carbapenemase_families: carba.into_iter().map(str::to_string).collect(),
            microarray_found: found,
            microarray_missing: missing,
        });
    }

    let sensitivity = Rate::from_ratio(counts.tp, counts.positives());
    let specificity = Rate::from_ratio(counts.tn, counts.negatives());
    let microarray_sensitivity =
        Rate::from_ratio(microarray_matched, params.concordance_denominator);

    if !sensitivity.is_defined() {
        tracing::warn!("no phenotype-positive samples; sensitivity is undefined");
    }
    if !specificity.is_defined() {
        tracing::warn!("no phenotype-negative samples; specificity is undefined");
    }
    if !microarray_sensitivity.is_defined() {
        tracing::warn!("concordance denominator is 0; microarray sensitivity is undefined");
    } else if microarray_matched > params.concordance_denominator {
        tracing::warn!(
            "matched microarray families ({}) exceed the concordance denominator ({})",
            microarray_matched,
            params.concordance_denominator
        );
    }

    RunScore {
        sensitivity,
        specificity,
        microarray_sensitivity,
        counts,
        microarray_matched,
        concordance_denominator: params.concordance_denominator,
        samples,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_score.rs"]
mod tests;
