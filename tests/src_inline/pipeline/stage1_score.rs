use std::path::PathBuf;

use super::*;
use crate::input::{PredictionRecord, ReferenceRecord};
use crate::model::profile::BenchmarkProfile;

fn rec(sample: &str, hit: &str) -> PredictionRecord {
    PredictionRecord {
        sample: sample.to_string(),
        best_hit: hit.to_string(),
        identity: "100.0".to_string(),
        coverage: "100.0".to_string(),
        depth: "30".to_string(),
    }
}

fn reference(rows: &[(&str, &str, Phenotype)]) -> ReferenceTable {
    ReferenceTable {
        path: PathBuf::from("ref.tsv"),
        records: rows
            .iter()
            .map(|(id, micro, pheno)| ReferenceRecord {
                strain_id: id.to_string(),
                microarray_families: crate::input::reference::parse_microarray_list(micro),
                phenotype: *pheno,
            })
            .collect(),
    }
}

fn predictions(rows: &[(&str, &str)]) -> PredictionTable {
    PredictionTable::from_records(
        PathBuf::from("pred.tsv"),
        rows.iter().map(|(s, h)| rec(s, h)).collect(),
    )
}

fn score(reference: &ReferenceTable, table: &PredictionTable, denominator: u32) -> RunScore {
    let profile = BenchmarkProfile::default_v1();
    score_run(
        reference,
        table,
        &ScoreParams {
            carbapenemase_families: &profile.carbapenemase_families,
            concordance_denominator: denominator,
        },
    )
}

#[test]
fn test_all_positive_detected_gives_full_sensitivity() {
    let r = reference(&[
        ("S1", "OXA-48", Phenotype::Positive),
        ("S2", "KPC", Phenotype::Positive),
    ]);
    let p = predictions(&[("S1", "blaOXA-48"), ("S2", "blaKPC-3"), ("S2", "sul1")]);
    let s = score(&r, &p, 33);
    assert_eq!(s.sensitivity.percent(), Some(100));
    assert_eq!(s.counts.tp, 2);
    assert_eq!(s.specificity, Rate::UNDEFINED);
}

#[test]
fn test_confusion_quadrants() {
    let r = reference(&[
        ("TP", "", Phenotype::Positive),
        ("FN", "", Phenotype::Positive),
        ("TN", "", Phenotype::Negative),
        ("FP", "", Phenotype::Negative),
        ("TN2", "", Phenotype::Negative),
    ]);
    let p = predictions(&[
        ("TP", "blaVIM-2"),
        ("FN", "tet(A)"),
        ("TN", "sul2"),
        ("FP", "blaCTX-M-15"),
    ]);
    let s = score(&r, &p, 33);
    assert_eq!(
        s.counts,
        ConfusionCounts {
            tp: 1,
            tn: 2,
            fp: 1,
            fn_: 1
        }
    );
    assert_eq!(s.sensitivity.percent(), Some(50));
    assert_eq!(s.specificity.percent(), Some(67));
    let outcomes: Vec<_> = s.samples.iter().map(|x| x.outcome.short_name()).collect();
    assert_eq!(outcomes, vec!["TP", "FN", "TN", "FP", "TN"]);
}

#[test]
fn test_sample_without_predictions_counts_as_not_detected() {
    let r = reference(&[("S1", "NDM", Phenotype::Positive)]);
    let p = predictions(&[("OTHER", "blaNDM-1")]);
    let s = score(&r, &p, 33);
    assert_eq!(s.counts.fn_, 1);
    assert_eq!(s.microarray_matched, 0);
    assert_eq!(s.samples[0].microarray_missing, vec!["NDM"]);
}

#[test]
fn test_microarray_count_is_global() {
    let r = reference(&[
        ("S1", "OXA-48, CTX-M", Phenotype::Positive),
        ("S2", "KPC, VIM", Phenotype::Positive),
    ]);
    let p = predictions(&[
        ("S1", "blaOXA-48"),
        ("S1", "blaCTX-M-15"),
        ("S2", "blaKPC-2"),
    ]);
    let s = score(&r, &p, 33);
    assert_eq!(s.microarray_matched, 3);
    assert_eq!(s.microarray_sensitivity.percent(), Some(9));
    assert_eq!(s.samples[1].microarray_found, vec!["KPC"]);
    assert_eq!(s.samples[1].microarray_missing, vec!["VIM"]);
}

#[test]
fn test_concordance_full_at_fixed_denominator() {
    let families: Vec<String> = (0..33).map(|i| format!("FAM{i:02}")).collect();
    let micro = families.join(", ");
    let r = reference(&[("S1", micro.as_str(), Phenotype::Positive)]);
    let hits: Vec<(&str, &str)> = families.iter().map(|f| ("S1", f.as_str())).collect();
    let p = predictions(&hits);
    let s = score(&r, &p, 33);
    assert_eq!(s.microarray_matched, 33);
    assert_eq!(s.microarray_sensitivity.percent(), Some(100));
}

#[test]
fn test_zero_denominator_is_undefined() {
    let r = reference(&[("S1", "OXA", Phenotype::Negative)]);
    let p = predictions(&[]);
    let s = score(&r, &p, 0);
    assert_eq!(s.microarray_sensitivity, Rate::UNDEFINED);
    assert_eq!(s.sensitivity, Rate::UNDEFINED);
    assert_eq!(s.specificity.percent(), Some(100));
}

#[test]
fn test_distinct_families_recorded() {
    let r = reference(&[("S1", "", Phenotype::Positive)]);
    let p = predictions(&[("S1", "blaOXA-48"), ("S1", "blaOXA-232"), ("S1", "blaSHV-1")]);
    let s = score(&r, &p, 33);
    assert_eq!(s.samples[0].carbapenemase_families, vec!["OXA", "SHV"]);
}
