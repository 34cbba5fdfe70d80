use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::pipeline::stage2_diff::DiffTable;
use crate::report::html::{DIFF_TITLE, render_diff_html, render_summary_html};
use crate::report::json::render_summary_json;
use crate::report::pdf::render_pdf;
use crate::report::tsv::write_diff_tsv;
use crate::report::{ReportError, SummaryData};

pub const SUMMARY_PDF: &str = "pipeline_benchmark_summary.pdf";
pub const SUMMARY_HTML: &str = "pipeline_benchmark_summary.html";
pub const DIFF_HTML: &str = "pipeline_comparison.html";
pub const DIFF_TSV: &str = "pipeline_comparison.tsv";
pub const SUMMARY_JSON: &str = "summary.json";

#[derive(Debug, Clone)]
pub enum PdfMode {
    Render { renderer: String },
    Skip,
}

#[derive(Debug, Clone)]
pub struct Stage3Input<'a> {
    pub summary: &'a SummaryData,
    pub diff: &'a DiffTable,
    pub pdf: PdfMode,
}

pub fn write_reports(input: &Stage3Input<'_>, out_dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    let summary_html = render_summary_html(&input.summary.runs);
    let html_path = out_dir.join(SUMMARY_HTML);
    write_text(&html_path, &summary_html)?;
    written.push(html_path);

    if let PdfMode::Render { renderer } = &input.pdf {
        let pdf_path = out_dir.join(SUMMARY_PDF);
        render_pdf(&summary_html, &pdf_path, renderer)?;
        written.push(pdf_path);
    }

    let diff_path = out_dir.join(DIFF_HTML);
    write_text(&diff_path, &render_diff_html(input.diff, DIFF_TITLE))?;
    written.push(diff_path);

    let tsv_path = out_dir.join(DIFF_TSV);
    write_diff_tsv(input.diff, &tsv_path)?;
    written.push(tsv_path);

    let json_path = out_dir.join(SUMMARY_JSON);
    write_text(&json_path, &render_summary_json(input.summary)?)?;
    written.push(json_path);

    for path in &written {
        tracing::info!("wrote {}", path.display());
    }
    Ok(written)
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
