//! Positional fallback for the four intake slots.
//!
//! The Nth user answer (greetings excluded) fills the Nth slot. Local only,
//! no failure modes.

use crate::models::{Message, MessageRole, SummaryKey};

/// Value used for a slot the patient never answered.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Exact (case-insensitive) user messages that do not count as answers.
const GREETINGS: &[&str] = &["hello", "hi"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalFields {
    pub symptoms: String,
    pub duration: String,
    pub severity: String,
    pub additional_info: String,
}

impl PositionalFields {
    pub fn get(&self, key: SummaryKey) -> &str {
        match key {
            SummaryKey::Symptoms => &self.symptoms,
            SummaryKey::Duration => &self.duration,
            SummaryKey::Severity => &self.severity,
            SummaryKey::AdditionalInfo => &self.additional_info,
        }
    }
}

fn is_greeting(content: &str) -> bool {
    let lowered = content.to_lowercase();
    GREETINGS.contains(&lowered.as_str())
}

/// Map the 1st..4th non-greeting user messages to Symptoms, Duration,
/// Severity and Additional Info.
pub fn extract_positional(transcript: &[Message]) -> PositionalFields {
    let mut answers = transcript
        .iter()
        .filter(|m| m.role == MessageRole::User && !is_greeting(&m.content))
        .map(|m| m.content.as_str());

    let mut next = || answers.next().unwrap_or(NOT_SPECIFIED).to_string();

    PositionalFields {
        symptoms: next(),
        duration: next(),
        severity: next(),
        additional_info: next(),
    }
}
