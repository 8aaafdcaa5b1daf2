use crate::models::{Message, SummaryKey};

use super::GatewayError;

/// First assistant turn of every session.
pub const GREETING: &str = "Hello! I'm here to assist your doctor with the necessary details you provide here. What symptoms are you experiencing?";

/// Behavioural script for live replies: one follow-up question at a time,
/// Symptoms, Duration, Severity, Additional Information, then a closing
/// statement. The diagnosis is never shown to the patient.
pub const SYSTEM_PROMPT: &str = concat!(
    "You are a clinical chatbot designed to collect patient information for doctor evaluation. ",
    "Your responses must remain strictly objective and neutral, without expressing sympathy, empathy, or emotion. ",
    "Do not offer any diagnoses or assumptions regarding the patient's condition. ",
    "Instead, you are to ask direct, necessary questions to gather the relevant information. ",
    "Begin the conversation with: 'Hello! I am here to assist your doctor by gathering the necessary details from you. ",
    "What symptoms are you currently experiencing?' ",
    "After each patient response, ask one follow-up question at a time. For example: ",
    "After receiving the patient's description of their symptoms, ask about the duration of the symptoms. ",
    "Subsequently, ask about the severity of the symptoms, and then inquire if there is any additional information ",
    "the patient wishes to provide. ",
    "Once all the necessary information has been collected, finalize the conversation with a statement along the lines of: ",
    "'Thank you for answering my questions. Your doctor will now receive the report from our conversation ",
    "and assist you with the diagnosis.' ",
    "Under no circumstances should you return the report or any diagnosis to the patient in the chat. ",
    "Ensure all patient responses are retained in memory so that a report for the doctor can be produced afterwards."
);

/// Serialise the transcript the way the summary and diagnosis prompts embed it.
pub fn transcript_json(transcript: &[Message]) -> Result<String, GatewayError> {
    serde_json::to_string_pretty(transcript).map_err(|e| GatewayError::Serialization(e.to_string()))
}

/// Instruction demanding a JSON object with exactly the four summary keys.
pub fn build_summary_prompt(transcript: &[Message]) -> Result<String, GatewayError> {
    let template = SummaryKey::ALL
        .iter()
        .map(|k| format!("  \"{}\": \"...\"", k.label()))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!(
        "Based on the following conversation in JSON format, provide a concise summary for each of the \
         following sections: Symptoms, Duration, Severity, and Additional Info. \
         Your answer should be in valid JSON format as shown below:\n\
         {{\n{template}\n}}\n\
         Only output valid JSON.\n\n\
         Conversation JSON:\n{}",
        transcript_json(transcript)?
    ))
}

/// Instruction for the clinician-only near diagnosis.
pub fn build_diagnosis_prompt(transcript: &[Message]) -> Result<String, GatewayError> {
    Ok(format!(
        "You are a medical analysis assistant. Analyze the following conversation between a clinical \
         chatbot and a patient (in JSON format). Based on the patient's responses, generate a concise \
         near diagnosis (an assumption) that may assist a doctor in further evaluation. \
         This text is for the doctor only and will never be shown to the patient. \
         Return only the near diagnosis in a couple of sentences and explain why.\n\n\
         Conversation JSON:\n{}",
        transcript_json(transcript)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Message> {
        vec![Message::assistant(GREETING), Message::user("fever")]
    }

    #[test]
    fn system_prompt_covers_question_order() {
        let symptoms = SYSTEM_PROMPT.find("symptoms").unwrap();
        let duration = SYSTEM_PROMPT.find("duration").unwrap();
        let severity = SYSTEM_PROMPT.find("severity").unwrap();
        let additional = SYSTEM_PROMPT.find("additional information").unwrap();
        assert!(symptoms < duration && duration < severity && severity < additional);
        assert!(SYSTEM_PROMPT.contains("Do not offer any diagnoses"));
    }

    #[test]
    fn summary_prompt_lists_all_keys_and_embeds_transcript() {
        let prompt = build_summary_prompt(&sample()).unwrap();
        for key in SummaryKey::ALL {
            assert!(prompt.contains(&format!("\"{}\": \"...\"", key.label())));
        }
        assert!(prompt.contains("Only output valid JSON."));
        assert!(prompt.contains("\"content\": \"fever\""));
    }

    #[test]
    fn diagnosis_prompt_embeds_transcript() {
        let prompt = build_diagnosis_prompt(&sample()).unwrap();
        assert!(prompt.starts_with("You are a medical analysis assistant."));
        assert!(prompt.contains("\"role\": \"user\""));
    }

    #[test]
    fn transcript_json_is_pretty_and_ordered() {
        let json = transcript_json(&sample()).unwrap();
        assert!(json.starts_with("[\n  {"));
        assert!(json.find("assistant").unwrap() < json.find("fever").unwrap());
    }
}
