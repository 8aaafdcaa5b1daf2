use serde_json::{Map, Value};

use crate::models::{SummaryFields, SummaryKey};

use super::GatewayError;

/// Strictly decode the model's summary reply.
///
/// The reply must be a JSON object, optionally wrapped in one Markdown code
/// fence. Each of the four keys maps to a string (used as is), `null` or a
/// missing key (absent), or any other JSON value (kept as its JSON text).
pub fn decode_summary(response: &str) -> Result<SummaryFields, GatewayError> {
    let json_str = strip_code_fence(response);

    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| GatewayError::MalformedSummary(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(GatewayError::MalformedSummary(
            "expected a JSON object at the top level".into(),
        ));
    };

    Ok(SummaryFields {
        symptoms: field(&map, SummaryKey::Symptoms),
        duration: field(&map, SummaryKey::Duration),
        severity: field(&map, SummaryKey::Severity),
        additional_info: field(&map, SummaryKey::AdditionalInfo),
    })
}

fn field(map: &Map<String, Value>, key: SummaryKey) -> Option<String> {
    match map.get(key.label())? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Remove one surrounding ```` ``` ```` fence (with optional info string).
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(body) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    match body.find('\n') {
        Some(pos) => body[pos + 1..].trim(),
        None => body.trim(),
    }
}
