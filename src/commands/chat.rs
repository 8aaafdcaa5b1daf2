//! Chat commands.
//!
//! - `open_session`: fresh transcript seeded with the assistant greeting
//! - `send_message`: record a patient line and the assistant's reply

use crate::gateway::{CompletionClient, ModelGateway, GREETING};
use crate::models::MessageRole;
use crate::transcript::TranscriptStore;

/// Start a session. The greeting is the first assistant turn.
pub fn open_session() -> TranscriptStore {
    let mut store = TranscriptStore::new();
    store.append(MessageRole::Assistant, GREETING);
    store
}

/// Send one patient line and return the assistant's reply.
///
/// Flow:
/// 1. Blank input is dropped: `None`, transcript untouched
/// 2. The trimmed line is appended as a user message
/// 3. The reply (or `Error: ...` text on failure) is appended as assistant
pub fn send_message<C: CompletionClient>(
    store: &mut TranscriptStore,
    gateway: &ModelGateway<C>,
    input: &str,
) -> Option<String> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    store.append(MessageRole::User, text);
    let reply = gateway.reply(store.snapshot());
    store.append(MessageRole::Assistant, reply.clone());

    tracing::info!(turns = store.len(), "Chat turn completed");
    Some(reply)
}
