use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::report::ReportError;

pub const DEFAULT_RENDERER: &str = "wkhtmltopdf";

/// Pipes `html` into an external HTML-to-PDF renderer reading stdin (`-`).
pub fn render_pdf(html: &str, output: &Path, renderer: &str) -> Result<(), ReportError> {
    let mut child = Command::new(renderer)
        .arg("--quiet")
        .arg("--encoding")
        .arg("utf-8")
        .arg("-")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ReportError::Render(format!("cannot start {renderer}: {e}")))?;

    // A renderer that exits early closes the pipe; its exit status is the
    // error worth reporting.
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(html.as_bytes()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!("{renderer} closed stdin before reading the report");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let output_status = child.wait_with_output()?;
    if !output_status.status.success() {
        let stderr = String::from_utf8_lossy(&output_status.stderr);
        return Err(ReportError::Render(format!(
            "{renderer} exited with {}: {}",
            output_status.status,
            stderr.trim()
        )));
    }
    Ok(())
}
