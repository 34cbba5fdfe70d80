use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::reader::open_maybe_gz;
use super::reference::parse_microarray_list;
use super::{InputError, load_predictions, load_reference, require_file};
use crate::model::outcome::Phenotype;
use crate::model::profile::{PredictionLayout, ReferenceLayout};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_amrbench_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

/// 17 columns: Sample, Best_hit, depth at 9, identity at 15, coverage at 16.
fn prediction_line(sample: &str, hit: &str, id: &str, cov: &str, depth: &str) -> String {
    let mut cols = vec![String::new(); 17];
    cols[0] = sample.to_string();
    cols[1] = hit.to_string();
    cols[9] = depth.to_string();
    cols[15] = id.to_string();
    cols[16] = cov.to_string();
    cols.join("\t")
}

fn prediction_header() -> String {
    let mut cols: Vec<String> = (0..17).map(|i| format!("c{i}")).collect();
    cols[0] = "Sample".to_string();
    cols[1] = "Best_hit".to_string();
    cols.join("\t")
}

fn reference_line(strain: &str, microarray: &str, pheno: &str) -> String {
    let mut cols = vec!["x".to_string(); 13];
    cols[0] = strain.to_string();
    cols[3] = microarray.to_string();
    cols[12] = pheno.to_string();
    cols.join("\t")
}

fn reference_header() -> String {
    let mut cols: Vec<String> = (0..13).map(|i| format!("r{i}")).collect();
    cols[0] = "Strain_ID".to_string();
    cols.join("\t")
}

#[test]
fn test_load_predictions_positional_columns() {
    let dir = make_temp_dir();
    let path = dir.join("pred.tsv");
    let text = format!(
        "{}\n{}\n{}\n{}\n",
        prediction_header(),
        prediction_line("S2", "blaKPC-2", "100.0", "99.5", "35"),
        prediction_line("S1", "blaOXA-48", "99.8", "100.0", "12.4"),
        prediction_line("S2", "sul1", "98.0", "97.0", "20"),
    );
    write_file(&path, &text);

    let table = load_predictions(&path, &PredictionLayout::default()).unwrap();
    assert_eq!(table.records.len(), 3);
    assert_eq!(table.labels_for("S2"), vec!["blaKPC-2", "sul1"]);
    let s1 = table.rows_for("S1");
    assert_eq!(s1[0].identity, "99.8");
    assert_eq!(s1[0].coverage, "100.0");
    assert_eq!(s1[0].depth, "12.4");
    assert_eq!(table.samples().collect::<Vec<_>>(), vec!["S1", "S2"]);
    assert!(table.labels_for("S9").is_empty());
}

#[test]
fn test_load_predictions_skips_empty_best_hit() {
    let dir = make_temp_dir();
    let path = dir.join("pred.tsv");
    let text = format!(
        "{}\n{}\n{}\n",
        prediction_header(),
        prediction_line("S1", "", "1", "1", "1"),
        prediction_line("S1", "blaVIM-1", "1", "1", "1"),
    );
    write_file(&path, &text);
    let table = load_predictions(&path, &PredictionLayout::default()).unwrap();
    assert_eq!(table.labels_for("S1"), vec!["blaVIM-1"]);
}

#[test]
fn test_load_predictions_missing_column() {
    let dir = make_temp_dir();
    let path = dir.join("pred.tsv");
    write_file(&path, "Sample\tGene\nS1\tblaOXA-48\n");
    let err = load_predictions(&path, &PredictionLayout::default()).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
    assert!(err.to_string().contains("Best_hit"));
}

#[test]
fn test_load_predictions_short_row() {
    let dir = make_temp_dir();
    let path = dir.join("pred.tsv");
    write_file(
        &path,
        &format!("{}\nS1\tblaOXA-48\t1\n", prediction_header()),
    );
    let err = load_predictions(&path, &PredictionLayout::default()).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_load_predictions_gz() {
    let dir = make_temp_dir();
    let path = dir.join("pred.tsv.gz");
    let text = format!(
        "{}\n{}\n",
        prediction_header(),
        prediction_line("S1", "blaNDM-1", "100", "100", "40"),
    );
    let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    enc.write_all(text.as_bytes()).unwrap();
    enc.finish().unwrap();

    let mut reader = open_maybe_gz(&path).unwrap();
    let mut first = String::new();
    reader.read_line(&mut first).unwrap();
    assert!(first.starts_with("Sample\tBest_hit"));

    let table = load_predictions(&path, &PredictionLayout::default()).unwrap();
    assert_eq!(table.labels_for("S1"), vec!["blaNDM-1"]);
}

#[test]
fn test_load_reference() {
    let dir = make_temp_dir();
    let path = dir.join("ref.tsv");
    let text = format!(
        "{}\n{}\n{}\n",
        reference_header(),
        reference_line("S1", "OXA-48, CTX-M-1", "POS"),
        reference_line("S2", "SHV", " NEG "),
    );
    write_file(&path, &text);
    let table = load_reference(&path, &ReferenceLayout::default()).unwrap();
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[0].strain_id, "S1");
    assert_eq!(table.records[0].microarray_families, vec!["OXA-48", "CTX-M-1"]);
    assert_eq!(table.records[0].phenotype, Phenotype::Positive);
    assert_eq!(table.records[1].phenotype, Phenotype::Negative);
    assert_eq!(table.n_positive(), 1);
    assert_eq!(table.n_negative(), 1);
}

#[test]
fn test_load_reference_rejects_bad_phenotype_and_duplicates() {
    let dir = make_temp_dir();
    let bad = dir.join("bad.tsv");
    write_file(
        &bad,
        &format!("{}\n{}\n", reference_header(), reference_line("S1", "OXA", "MAYBE")),
    );
    let err = load_reference(&bad, &ReferenceLayout::default()).unwrap_err();
    assert!(err.to_string().contains("POS or NEG"));

    let dup = dir.join("dup.tsv");
    write_file(
        &dup,
        &format!(
            "{}\n{}\n{}\n",
            reference_header(),
            reference_line("S1", "OXA", "POS"),
            reference_line("S1", "VIM", "NEG"),
        ),
    );
    let err = load_reference(&dup, &ReferenceLayout::default()).unwrap_err();
    assert!(err.to_string().contains("duplicate strain S1"));
}

#[test]
fn test_load_reference_empty() {
    let dir = make_temp_dir();
    let path = dir.join("ref.tsv");
    write_file(&path, &format!("{}\n", reference_header()));
    assert!(load_reference(&path, &ReferenceLayout::default()).is_err());
}

#[test]
fn test_parse_microarray_list() {
    assert_eq!(
        parse_microarray_list("OXA-48, NDM ,,KPC"),
        vec!["OXA-48", "NDM", "KPC"]
    );
    assert!(parse_microarray_list("  ").is_empty());
}

#[test]
fn test_require_file() {
    let dir = make_temp_dir();
    assert!(matches!(
        require_file(&dir.join("nope.tsv")),
        Err(InputError::MissingInput(_))
    ));
    assert!(require_file(&dir).is_err());
}
