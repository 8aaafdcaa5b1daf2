//! In-memory, append-only conversation transcript.
//!
//! The store is the only owner of the session's messages. Other components
//! read through `snapshot()` and never mutate earlier turns.

use crate::models::{Message, MessageRole};

/// Ordered, append-only list of role-tagged messages for one session.
#[derive(Debug, Clone, Default)]
pub struct TranscriptStore {
    messages: Vec<Message>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message to the end of the transcript.
    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) {
        let message = Message::new(role, content);
        tracing::debug!(
            role = message.role.as_str(),
            position = self.messages.len(),
            "Transcript: message appended"
        );
        self.messages.push(message);
    }

    /// Full ordered transcript, read-only.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The transcript as the chat view shows it: one `User: ` / `AI: `
    /// prefixed entry per non-blank line, system turns omitted.
    pub fn display_lines(&self) -> Vec<String> {
        display_lines(&self.messages)
    }
}

/// Render messages as chat-view lines. Multi-line contents become several
/// lines; blank lines are skipped and every line is trimmed.
pub fn display_lines(messages: &[Message]) -> Vec<String> {
    let mut text = String::new();
    for msg in messages {
        if let Some(label) = msg.role.display_label() {
            text.push_str(label);
            text.push_str(": ");
            text.push_str(&msg.content);
            text.push('\n');
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
