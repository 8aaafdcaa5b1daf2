//! The three remote calls the intake needs: live reply, structured summary,
//! and near diagnosis. Each is a one-shot round trip with no retry.

use super::parser::decode_summary;
use super::prompt::{build_diagnosis_prompt, build_summary_prompt, SYSTEM_PROMPT};
use super::types::{CompletionClient, CompletionRequest};
use super::GatewayError;
use crate::models::{Message, SummaryFields};

pub const REPLY_TEMPERATURE: f32 = 0.1;
pub const SUMMARY_TEMPERATURE: f32 = 0.2;
pub const DIAGNOSIS_TEMPERATURE: f32 = 0.2;

/// Prefix of the text a failed reply is replaced with.
pub const REPLY_ERROR_PREFIX: &str = "Error: ";
/// Prefix of the text a failed near diagnosis is replaced with.
pub const DIAGNOSIS_ERROR_PREFIX: &str = "Error generating near diagnosis: ";

pub struct ModelGateway<C> {
    client: C,
}

impl<C: CompletionClient> ModelGateway<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Next assistant turn for `history`, which already ends with the new
    /// user message. A failed call yields `Error: <detail>` instead of a
    /// reply; the caller stores it like any other assistant turn.
    pub fn reply(&self, history: &[Message]) -> String {
        match self.try_reply(history) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Reply generation failed");
                format!("{REPLY_ERROR_PREFIX}{e}")
            }
        }
    }

    pub fn try_reply(&self, history: &[Message]) -> Result<String, GatewayError> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(SYSTEM_PROMPT));
        messages.extend_from_slice(history);

        let request = CompletionRequest::new(messages, REPLY_TEMPERATURE);
        self.client
            .complete(&request)
            .map(|text| text.trim().to_string())
    }

    /// Structured summary of the whole transcript. Network failures and
    /// undecodable replies both come back as `Err`; the placeholder policy
    /// belongs to the caller.
    pub fn summarize(&self, transcript: &[Message]) -> Result<SummaryFields, GatewayError> {
        let prompt = build_summary_prompt(transcript)?;
        let request = CompletionRequest::single_system(prompt, SUMMARY_TEMPERATURE);
        let response = self.client.complete(&request)?;
        decode_summary(&response)
    }

    /// Clinician-only near diagnosis. A failed call yields
    /// `Error generating near diagnosis: <detail>`.
    pub fn near_diagnosis(&self, transcript: &[Message]) -> String {
        match self.try_near_diagnosis(transcript) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Near diagnosis generation failed");
                format!("{DIAGNOSIS_ERROR_PREFIX}{e}")
            }
        }
    }

    pub fn try_near_diagnosis(&self, transcript: &[Message]) -> Result<String, GatewayError> {
        let prompt = build_diagnosis_prompt(transcript)?;
        let request = CompletionRequest::single_system(prompt, DIAGNOSIS_TEMPERATURE);
        self.client
            .complete(&request)
            .map(|text| text.trim().to_string())
    }
}
