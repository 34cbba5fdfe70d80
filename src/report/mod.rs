pub mod html;
pub mod json;
pub mod pdf;
pub mod tsv;

use serde::Serialize;

use crate::pipeline::stage1_score::RunScore;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

/// One column of the summary report.
#[derive(Debug, Clone, Serialize)]
pub struct RunColumn {
    pub label: String,
    pub path: String,
    #[serde(flatten)]
    pub score: RunScore,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffSummary {
    pub reference_path: String,
    pub updated_path: String,
    pub n_samples: usize,
    pub n_agreements: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub reference_table: String,
    pub concordance_denominator: u32,
    pub runs: Vec<RunColumn>,
    pub diff: DiffSummary,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
