//! Error types
//!
//! Errors here are raised by arguments the resource author controls (the
//! timestamp or tag kind handed to a validator). Malformed client headers
//! never produce an error; they are absorbed by the evaluator.

use hyper::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FreshnessError {
    /// Unrecognised argument, e.g. an entity tag kind other than strong/weak
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A freshness timestamp that cannot be coerced to an instant
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Header value outside visible ASCII, which would read back as absent
    #[error("non-ASCII header value: {0:?}")]
    NonAsciiHeaderValue(String),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, FreshnessError>;
