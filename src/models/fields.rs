use serde::{Deserialize, Serialize};

/// The four clinical slots collected during intake, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKey {
    Symptoms,
    Duration,
    Severity,
    AdditionalInfo,
}

impl SummaryKey {
    pub const ALL: [SummaryKey; 4] = [
        SummaryKey::Symptoms,
        SummaryKey::Duration,
        SummaryKey::Severity,
        SummaryKey::AdditionalInfo,
    ];

    /// Key as it appears in the summary JSON and the report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Symptoms => "Symptoms",
            Self::Duration => "Duration",
            Self::Severity => "Severity",
            Self::AdditionalInfo => "Additional Info",
        }
    }
}

/// Model-produced summary. A slot the model left out is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFields {
    pub symptoms: Option<String>,
    pub duration: Option<String>,
    pub severity: Option<String>,
    pub additional_info: Option<String>,
}

impl SummaryFields {
    /// Every slot set to the same text.
    pub fn filled_with(text: &str) -> Self {
        Self {
            symptoms: Some(text.to_string()),
            duration: Some(text.to_string()),
            severity: Some(text.to_string()),
            additional_info: Some(text.to_string()),
        }
    }

    pub fn get(&self, key: SummaryKey) -> Option<&str> {
        match key {
            SummaryKey::Symptoms => self.symptoms.as_deref(),
            SummaryKey::Duration => self.duration.as_deref(),
            SummaryKey::Severity => self.severity.as_deref(),
            SummaryKey::AdditionalInfo => self.additional_info.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_summary_json_keys() {
        let labels: Vec<&str> = SummaryKey::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["Symptoms", "Duration", "Severity", "Additional Info"]);
    }

    #[test]
    fn filled_with_sets_every_slot() {
        let fields = SummaryFields::filled_with("x");
        for key in SummaryKey::ALL {
            assert_eq!(fields.get(key), Some("x"));
        }
    }

    #[test]
    fn default_summary_is_all_absent() {
        let fields = SummaryFields::default();
        assert!(SummaryKey::ALL.iter().all(|k| fields.get(*k).is_none()));
    }
}
