//! Command handlers: the interaction shell's only entry points. Each takes
//! the transcript store and model gateway explicitly and returns its result
//! instead of touching any view.

pub mod chat;
pub mod report;

pub use chat::{open_session, send_message};
pub use report::{extract_report, ExtractOutcome};
