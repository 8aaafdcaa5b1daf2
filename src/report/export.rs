use std::path::{Path, PathBuf};

use crate::config::OutputPaths;
use crate::models::Message;

use super::ReportError;

/// Write the full transcript as pretty JSON, replacing any earlier export.
pub fn write_transcript_export(
    transcript: &[Message],
    paths: &OutputPaths,
) -> Result<PathBuf, ReportError> {
    let json = serde_json::to_string_pretty(transcript)?;
    let path = paths.transcript_export();
    write_file(&path, json.as_bytes())?;
    tracing::info!(path = %path.display(), messages = transcript.len(), "Transcript exported");
    Ok(path)
}

/// Write the rendered report, replacing any earlier one.
pub fn write_report(pdf_bytes: &[u8], paths: &OutputPaths) -> Result<PathBuf, ReportError> {
    let path = paths.report();
    write_file(&path, pdf_bytes)?;
    tracing::info!(path = %path.display(), bytes = pdf_bytes.len(), "Report written");
    Ok(path)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)
}
