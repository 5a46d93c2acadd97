//! Pagination position.
//!
//! The log query API hands out its continuation locator in the `Link`
//! response header rather than in the body, so the cursor is modelled as an
//! explicit tagged value that the caller threads from one page to the next.
//!
//! ```text
//! StartMarker(id) ──first page──▶ ContinuationToken(url) ──▶ ContinuationToken(url) ──▶ …
//! ```
//!
//! Once a continuation token has been obtained it supersedes the start
//! marker for the rest of the run.

use std::fmt;

/// Where the next page request starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Explicit starting log id, used only for the first request of a run.
    StartMarker(String),
    /// Opaque follow-up URL taken verbatim from the previous response.
    ContinuationToken(String),
}

impl Cursor {
    /// Cursor for the first page of a run.
    #[must_use]
    pub fn start(log_id: impl Into<String>) -> Self {
        Self::StartMarker(log_id.into())
    }

    /// Cursor for a follow-up page.
    #[must_use]
    pub fn continuation(url: impl Into<String>) -> Self {
        Self::ContinuationToken(url.into())
    }

    /// Short label for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::StartMarker(_) => "start_marker",
            Self::ContinuationToken(_) => "continuation",
        }
    }

    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        matches!(self, Self::ContinuationToken(_))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartMarker(id) => write!(f, "from={id}"),
            Self::ContinuationToken(url) => f.write_str(url),
        }
    }
}
