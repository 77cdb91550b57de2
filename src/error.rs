//! Crate-wide error type
//!
//! Errors only arise at the boundary (payload decoding, record construction,
//! configuration, report output). Once a batch of `SentimentRecord`s is held
//! in memory, every engine operation is total.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SentimentError>;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Malformed record #{index}: field `{field}` {reason}")]
    MalformedRecord {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Unsupported payload format: expected `data.sentiments`, `sentiments` or `records`")]
    UnsupportedFormat,

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SentimentError {
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        SentimentError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Attach the position of the offending record within its payload.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            SentimentError::InvalidField { field, reason } => {
                SentimentError::MalformedRecord { index, field, reason }
            }
            other => other,
        }
    }
}
