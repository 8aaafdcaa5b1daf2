//! Report command.
//!
//! `extract_report` runs the whole extraction: positional fallback,
//! transcript export, model summary, merge, near diagnosis, layout, PDF.
//! Remote failures have already become placeholder text by the time the
//! report is drawn; only local I/O and PDF errors are returned.

use std::path::PathBuf;

use crate::config::OutputPaths;
use crate::extractor::extract_positional;
use crate::gateway::{CompletionClient, ModelGateway};
use crate::report::{
    layout_report, normalize_patient_name, render_pdf, summary_or_placeholder,
    write_report, write_transcript_export, ExtractedFields, PageGeometry, Report, ReportError,
};
use crate::transcript::TranscriptStore;

/// What one extraction produced.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    pub fields: ExtractedFields,
    pub diagnosis: String,
    pub transcript_path: PathBuf,
    pub report_path: PathBuf,
    pub page_count: usize,
}

/// Build the doctor's report from the current transcript.
///
/// `patient_name` is `None` when the name prompt was cancelled.
pub fn extract_report<C: CompletionClient>(
    store: &TranscriptStore,
    gateway: &ModelGateway<C>,
    patient_name: Option<&str>,
    paths: &OutputPaths,
) -> Result<ExtractOutcome, ReportError> {
    let transcript = store.snapshot();
    let patient_name = normalize_patient_name(patient_name);

    let positional = extract_positional(transcript);
    let transcript_path = write_transcript_export(transcript, paths)?;

    let summary = summary_or_placeholder(gateway.summarize(transcript));
    let fields = ExtractedFields::merge(patient_name, &summary, &positional);
    let diagnosis = gateway.near_diagnosis(transcript);

    let report = Report::compose(fields, transcript, diagnosis);
    let geometry = PageGeometry::default();
    let pages = layout_report(&report, &geometry);
    let pdf = render_pdf(&pages, &geometry)?;
    let report_path = write_report(&pdf, paths)?;

    tracing::info!(
        pages = pages.len(),
        messages = transcript.len(),
        "Extraction completed"
    );

    Ok(ExtractOutcome {
        fields: report.fields,
        diagnosis: report.diagnosis,
        transcript_path,
        report_path,
        page_count: pages.len(),
    })
}
