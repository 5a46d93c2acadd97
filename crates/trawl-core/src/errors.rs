//! Cross-cutting error types for trawl.
//!
//! Domain-specific errors (`SourceError`, `DatabaseError`, ...) live in their
//! respective crates. `anyhow` is only used at the binary edge.

use thiserror::Error;

/// Errors raised while building core values from untrusted input.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The date-time argument matched none of the accepted layouts.
    #[error("invalid date-time format '{input}'. {}", crate::args::VALID_DATE_FORMATS)]
    InvalidDateFormat { input: String },

    /// A log id was empty or contained non-digit characters.
    #[error("invalid log ID '{0}': it should only contain numbers")]
    InvalidLogId(String),
}
