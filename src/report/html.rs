use std::fmt::Write;

use crate::pipeline::stage2_diff::DiffTable;
use crate::report::{RunColumn, escape_html};

pub const DIFF_TITLE: &str = "Gene prediction differences in pipelines report";

const SUMMARY_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
table, th, td {
  border: 1px solid black;
}

table {
  width: 100%;
}
</style>
</head>
<body>
<h1><strong>Pipeline benchmark report</strong></h1>
<br></br>
<p>
<br>This report was generated by the 'kira-amrbench benchmark' command.
<br>A summary table of the raw data is available under the name 'reference_table.tsv'
<br>For further information on the data and how percentages were calculated, take a look at the README file
<br>The sensitivity and specificity were calculated using the data from the following paper:
<br>https://www.sciencedirect.com/science/article/pii/S1198743X15600660?via%3Dihub
</p>
<br></br>
"#;

const DIFF_HEAD: &str = r#"<html>
<head>
<meta charset="utf-8">
<style>
  h2 {
    text-align: center;
    font-family: Helvetica, Arial, sans-serif;
  }
  table {
    margin-left: auto;
    margin-right: auto;
  }
  table, th, td {
    border: 1px solid black;
    border-collapse: collapse;
  }
  th, td {
    padding: 5px;
    text-align: center;
    font-family: Helvetica, Arial, sans-serif;
    font-size: 90%;
  }
  table tbody tr:hover {
    background-color: #dddddd;
  }
  .wide {
    width: 90%;
  }
</style>
</head>
<body>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

pub fn render_summary_html(runs: &[RunColumn]) -> String {
    let mut out = String::from(SUMMARY_HEAD);

    out.push_str("<h2>Phenotype(MIC) Sensitivity and Specificity</h2>\n\n<table>\n");
    push_header_row(&mut out, runs);
    push_rate_row(&mut out, "Sensitivity", runs.iter().map(|r| r.score.sensitivity));
    push_rate_row(&mut out, "Specificity", runs.iter().map(|r| r.score.specificity));
    out.push_str("</table>\n\n");

    out.push_str("<h2>Microarray Sensitivity</h2>\n\n<table>\n");
    push_header_row(&mut out, runs);
    push_rate_row(
        &mut out,
        "Sensitivity",
        runs.iter().map(|r| r.score.microarray_sensitivity),
    );
    out.push_str("</table>\n\n");

    out.push_str(PAGE_TAIL);
    out
}

fn push_header_row(out: &mut String, runs: &[RunColumn]) {
    out.push_str("  <tr>\n");
    for run in runs {
        let _ = writeln!(out, "    <th>{}</th>", escape_html(&run.label));
    }
    out.push_str("  </tr>\n");
}

fn push_rate_row(
    out: &mut String,
    name: &str,
    rates: impl Iterator<Item = crate::model::rate::Rate>,
) {
    out.push_str("  <tr>\n");
    for rate in rates {
        let _ = writeln!(out, "    <td>{name}: {rate}</td>");
    }
    out.push_str("  </tr>\n");
}

/// Diff table with a leading row index column.
pub fn render_diff_html(table: &DiffTable, title: &str) -> String {
    let mut out = String::from(DIFF_HEAD);
    if !title.is_empty() {
        let _ = writeln!(out, "<h2> {} </h2>", escape_html(title));
    }
    out.push_str("<table border=\"1\" class=\"dataframe\">\n");
    out.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
    out.push_str("      <th></th>\n");
    out.push_str("      <th>Sample Name</th>\n");
    out.push_str("      <th>Prediction in reference pipeline</th>\n");
    out.push_str("      <th>Prediction in updated pipeline</th>\n");
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for (idx, row) in table.rows.iter().enumerate() {
        out.push_str("    <tr>\n");
        let _ = writeln!(out, "      <th>{idx}</th>");
        let _ = writeln!(out, "      <td>{}</td>", escape_html(&row.sample));
        let _ = writeln!(out, "      <td>{}</td>", escape_html(&row.reference));
        let _ = writeln!(out, "      <td>{}</td>", escape_html(&row.updated));
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");
    out.push_str(PAGE_TAIL);
    out
}
