use crate::models::Message;

use super::GatewayError;

/// One chat-completion round trip: ordered messages in, one text out.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            messages,
            temperature,
        }
    }

    /// A request carrying a single system-role instruction.
    pub fn single_system(prompt: String, temperature: f32) -> Self {
        Self::new(vec![Message::system(prompt)], temperature)
    }
}

/// Remote completion API abstraction (allows mocking)
pub trait CompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
