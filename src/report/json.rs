use crate::report::{ReportError, SummaryData};

pub fn render_summary_json(data: &SummaryData) -> Result<String, ReportError> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}
