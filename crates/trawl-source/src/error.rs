//! Log source error types.

use thiserror::Error;

/// Errors that can occur when talking to the log query API.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The body is not a JSON array of log records.
    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// Decoder error.
        reason: String,
        /// The offending body, kept for diagnostics.
        body: String,
    },

    /// An endpoint or continuation URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No log exists in the requested date window.
    #[error("first log not found between {from} and {to}")]
    FirstLogNotFound { from: String, to: String },
}
