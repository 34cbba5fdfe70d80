mod convert;
mod families;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::input::{load_predictions, load_reference, require_file};
use crate::model::profile::BenchmarkProfile;
use crate::pipeline::stage1_score::{ScoreParams, score_run};
use crate::pipeline::stage2_diff::build_diff_table;
use crate::pipeline::stage3_report::{PdfMode, Stage3Input, write_reports};
use crate::report::pdf::DEFAULT_RENDERER;
use crate::report::{DiffSummary, RunColumn, SummaryData};

const TOOL_NAME: &str = "kira-amrbench";
const DEFAULT_REFERENCE: &str = "reference_table.tsv";
const DEFAULT_BASELINE_2_6: &str = "diag_pipelines_2.6.0/combined_detail_NR_2.6.tsv";
const DEFAULT_BASELINE_2_7: &str = "diag_pipelines_2.7.0/combined_detail_NR_2.7.tsv";

#[derive(Debug, Parser)]
#[command(name = TOOL_NAME, version, about)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare a new pipeline TSV to the reference data and older pipelines.
    Benchmark(BenchmarkArgs),
    /// Convert a CSV table into a single-sheet XLSX workbook.
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
struct BenchmarkArgs {
    /// Combined prediction TSV of the new pipeline.
    #[arg(value_name = "PIPELINE_TSV", value_parser = existing_file)]
    pipeline_tsv: PathBuf,

    /// Output directory.
    #[arg(short, long, value_name = "DIR", value_parser = existing_dir)]
    out: Option<PathBuf>,

    /// Reference table with microarray and phenotype data.
    #[arg(long, value_name = "TSV", default_value = DEFAULT_REFERENCE)]
    reference: PathBuf,

    /// Prediction TSV of Diag Pipelines 2.6.0; also the diff baseline.
    #[arg(long = "baseline-2-6", value_name = "TSV", default_value = DEFAULT_BASELINE_2_6)]
    baseline_2_6: PathBuf,

    /// Prediction TSV of Diag Pipelines 2.7.0.
    #[arg(long = "baseline-2-7", value_name = "TSV", default_value = DEFAULT_BASELINE_2_7)]
    baseline_2_7: PathBuf,

    /// JSON benchmark profile (families, denominator, column layout).
    #[arg(long, value_name = "JSON")]
    profile: Option<PathBuf>,

    /// Override the microarray concordance denominator.
    #[arg(long, value_name = "N")]
    concordance_denominator: Option<u32>,

    /// HTML-to-PDF renderer executable.
    #[arg(long, value_name = "BIN", default_value = DEFAULT_RENDERER)]
    pdf_renderer: String,

    /// Write the summary as HTML only.
    #[arg(long)]
    skip_pdf: bool,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    #[arg(long, value_name = "CSV")]
    input: PathBuf,

    #[arg(long, value_name = "XLSX")]
    output: PathBuf,

    /// Software wildcard; first half of the sheet name.
    #[arg(long)]
    software: String,

    /// Sample wildcard; second half of the sheet name.
    #[arg(long)]
    sample: String,

    #[arg(long, default_value_t = ',', value_parser = single_byte_char)]
    delimiter: char,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Benchmark(args) => run_benchmark(&args),
        Command::Convert(args) => run_convert(&args),
    }
}

fn run_benchmark(args: &BenchmarkArgs) -> Result<(), String> {
    let profile = resolve_profile(args.profile.as_deref(), args.concordance_denominator)
        .map_err(|e| e.to_string())?;
    let out_dir = resolve_output_dir(args.out.as_deref());

    for path in [&args.reference, &args.baseline_2_6, &args.baseline_2_7] {
        require_file(path).map_err(|e| e.to_string())?;
    }

    let reference =
        load_reference(&args.reference, &profile.reference).map_err(|e| e.to_string())?;
    let params = ScoreParams {
        carbapenemase_families: &profile.carbapenemase_families,
        concordance_denominator: profile.concordance_denominator,
    };

    let pipelines = [
        ("Diag Pipelines 2.6.0", &args.baseline_2_6),
        ("Diag Pipelines 2.7.0", &args.baseline_2_7),
        ("New Pipeline", &args.pipeline_tsv),
    ];

    let mut tables = Vec::with_capacity(pipelines.len());
    let mut runs = Vec::with_capacity(pipelines.len());
    for (label, path) in pipelines {
        let table = load_predictions(path, &profile.predictions).map_err(|e| e.to_string())?;
        let score = score_run(&reference, &table, &params);
        tracing::info!(
            "{}: sensitivity={}, specificity={}, microarray={} ({}/{}), TP={} TN={} FP={} FN={}",
            label,
            score.sensitivity,
            score.specificity,
            score.microarray_sensitivity,
            score.microarray_matched,
            score.concordance_denominator,
            score.counts.tp,
            score.counts.tn,
            score.counts.fp,
            score.counts.fn_
        );
        for sample in &score.samples {
            tracing::debug!(
                "{} {}: {} carbapenemase=[{}] microarray_missing=[{}]",
                label,
                sample.strain_id,
                sample.outcome.short_name(),
                sample.carbapenemase_families.join(", "),
                sample.microarray_missing.join(", ")
            );
        }
        runs.push(RunColumn {
            label: label.to_string(),
            path: path.display().to_string(),
            score,
        });
        tables.push(table);
    }

    let diff = build_diff_table(&tables[0], &tables[2]);
    tracing::info!(
        "diff table: samples={}, agreeing={}",
        diff.rows.len(),
        diff.n_agreements()
    );

    let summary = SummaryData {
        tool: TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        reference_table: reference.path.display().to_string(),
        concordance_denominator: profile.concordance_denominator,
        diff: DiffSummary {
            reference_path: tables[0].path.display().to_string(),
            updated_path: tables[2].path.display().to_string(),
            n_samples: diff.rows.len(),
            n_agreements: diff.n_agreements(),
        },
        runs,
    };

    let input = Stage3Input {
        summary: &summary,
        diff: &diff,
        pdf: if args.skip_pdf {
            PdfMode::Skip
        } else {
            PdfMode::Render {
                renderer: args.pdf_renderer.clone(),
            }
        },
    };
    write_reports(&input, &out_dir).map_err(|e| e.to_string())?;
    Ok(())
}

fn run_convert(args: &ConvertArgs) -> Result<(), String> {
    let sheet = convert::sheet_name(&args.software, &args.sample);
    let stats =
        convert::convert_csv_to_xlsx(&args.input, &args.output, &sheet, args.delimiter as u8)
            .map_err(|e| e.to_string())?;
    if stats.rows == 0 {
        tracing::warn!("{} has a header but no rows", args.input.display());
    }
    tracing::debug!("converted {} columns", stats.columns);
    Ok(())
}

fn resolve_profile(
    path: Option<&Path>,
    denominator: Option<u32>,
) -> Result<BenchmarkProfile, input::InputError> {
    let mut profile = match path {
        Some(p) => {
            tracing::info!("using profile {}", p.display());
            BenchmarkProfile::load(p)?
        }
        None => BenchmarkProfile::default_v1(),
    };
    if let Some(n) = denominator {
        profile.concordance_denominator = n;
    }
    Ok(profile)
}

fn resolve_output_dir(out: Option<&Path>) -> PathBuf {
    match out {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from("."),
    }
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err("File does not exist".to_string())
    }
}

fn existing_dir(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.exists() {
        Ok(path)
    } else {
        Err("Output path does not exist".to_string())
    }
}

fn single_byte_char(raw: &str) -> Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some('t')) if raw.len() == 2 => Ok('\t'),
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err("delimiter must be a single ASCII character".to_string()),
    }
}
