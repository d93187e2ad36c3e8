//! Error types for the envelope codec

use crate::registry::Tag;
use thiserror::Error;

/// Errors that can occur while decoding a wire tree
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid {tag} payload: expected {expected}, got {got}")]
    InvalidPayload {
        tag: Tag,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Binary payload element {index} is not a byte: {value}")]
    ByteOutOfRange { index: usize, value: String },

    #[error("Timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),

    #[error("PairCollection entry {index} has {len} elements, expected 2")]
    InvalidPair { index: usize, len: usize },

    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
