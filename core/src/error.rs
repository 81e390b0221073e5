//! Error types for the entity API client.
//!
//! # Design
//! Every variant is a failure of the fetch; nothing here is retried or
//! recovered by the client. `NotFound` gets a dedicated variant because
//! callers frequently distinguish "the record does not exist" from "the
//! server returned an unexpected status".

use thiserror::Error;

/// Boxed error raised by the underlying HTTP stack.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request never produced a response (connect, timeout, reset, ...).
    #[error("transport failed: {0}")]
    Transport(#[source] BoxError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        ApiError::Transport(err.into())
    }
}
