use serde::Serialize;

use crate::extractor::PositionalFields;
use crate::gateway::GatewayError;
use crate::models::{Message, SummaryFields, SummaryKey};
use crate::transcript::display_lines;

pub const REPORT_TITLE: &str = "Clinic AI Chatbot Report";
pub const TRANSCRIPT_HEADING: &str = "Chat Transcript:";
pub const ASSUMPTIONS_HEADING: &str = "AI's Assumptions (Near Diagnosis):";

pub const PATIENT_NAME_LABEL: &str = "Patient Name";
/// Patient name used when the prompt is left blank or cancelled.
pub const UNKNOWN_PATIENT: &str = "Unknown";
/// Every summary slot is set to this when the summary call fails.
pub const SUMMARY_ERROR_PLACEHOLDER: &str = "Error generating summary.";

/// Trimmed patient name, or `Unknown` when blank or cancelled (`None`).
pub fn normalize_patient_name(input: Option<&str>) -> String {
    match input.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_PATIENT.to_string(),
    }
}

/// Placeholder policy for the summary call: any failure fills all four
/// slots with `Error generating summary.`. No partial recovery.
pub fn summary_or_placeholder(result: Result<SummaryFields, GatewayError>) -> SummaryFields {
    match result {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "Summary generation failed; using placeholder fields");
            SummaryFields::filled_with(SUMMARY_ERROR_PLACEHOLDER)
        }
    }
}

/// Final field set printed at the top of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    pub patient_name: String,
    pub symptoms: String,
    pub duration: String,
    pub severity: String,
    pub additional_info: String,
}

impl ExtractedFields {
    /// Per slot, the model summary wins when it has a value; otherwise the
    /// positional answer is used.
    pub fn merge(
        patient_name: String,
        summary: &SummaryFields,
        positional: &PositionalFields,
    ) -> Self {
        let pick = |key: SummaryKey| {
            summary
                .get(key)
                .unwrap_or_else(|| positional.get(key))
                .to_string()
        };

        Self {
            patient_name,
            symptoms: pick(SummaryKey::Symptoms),
            duration: pick(SummaryKey::Duration),
            severity: pick(SummaryKey::Severity),
            additional_info: pick(SummaryKey::AdditionalInfo),
        }
    }

    /// `(label, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            (PATIENT_NAME_LABEL, self.patient_name.as_str()),
            (SummaryKey::Symptoms.label(), self.symptoms.as_str()),
            (SummaryKey::Duration.label(), self.duration.as_str()),
            (SummaryKey::Severity.label(), self.severity.as_str()),
            (SummaryKey::AdditionalInfo.label(), self.additional_info.as_str()),
        ]
    }
}

/// Everything the rendered document shows. Built fresh per extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub fields: ExtractedFields,
    pub transcript_lines: Vec<String>,
    pub diagnosis: String,
}

impl Report {
    pub fn compose(fields: ExtractedFields, transcript: &[Message], diagnosis: String) -> Self {
        Self {
            fields,
            transcript_lines: display_lines(transcript),
            diagnosis,
        }
    }
}
