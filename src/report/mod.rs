//! Doctor-facing report: field merge, page layout, PDF rendering and the
//! two files written on every extraction.

pub mod compose;
pub mod export;
pub mod layout;
pub mod metrics;
pub mod pdf;

pub use compose::*;
pub use export::*;
pub use layout::*;
pub use metrics::*;
pub use pdf::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
