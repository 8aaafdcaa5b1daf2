pub mod types;
pub mod prompt;
pub mod parser;
pub mod client;
pub mod orchestrator;

pub use types::*;
pub use prompt::*;
pub use parser::*;
pub use client::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Cannot reach completion endpoint at {0}")]
    Connection(String),

    #[error("Completion endpoint returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Completion contained no message content")]
    EmptyCompletion,

    #[error("Malformed summary response: {0}")]
    MalformedSummary(String),

    #[error("Transcript serialization error: {0}")]
    Serialization(String),
}
