//! Error types for symptomscriber

use thiserror::Error;

/// Result type for symptomscriber operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a run.
///
/// A missing dictionary file is deliberately absent from this list: it is
/// treated as an empty dictionary by [`crate::store::load`].
#[derive(Error, Debug)]
pub enum Error {
    /// Input file extension is not one of csv, tsv, json, xml
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parse error, message includes the byte position
    #[error("XML error: {0}")]
    Xml(String),

    /// Settings file missing, unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Every `Symptom<N>` suffix up to `u64::MAX` is taken
    #[error("No symptom keys left to mint")]
    KeySpaceExhausted,

    /// Rejected manual input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
