//! Ingestion error types.

use thiserror::Error;
use trawl_core::Cursor;
use trawl_db::DatabaseError;
use trawl_source::SourceError;

use crate::IngestReport;

/// Why a run stopped before the stream was exhausted.
///
/// Both variants carry the progress made up to the failure. Everything
/// counted there is committed; re-running from the same starting marker is
/// safe.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Fetching a page failed (transport, status or decoding).
    #[error(
        "fetching page {} at {cursor} failed after {} records: {source}",
        .progress.pages + 1,
        .progress.fetched
    )]
    Fetch {
        cursor: Cursor,
        progress: IngestReport,
        #[source]
        source: SourceError,
    },

    /// The sink rejected an entry.
    #[error(
        "inserting log {log_id} failed after {} records: {source}",
        .progress.fetched
    )]
    Insert {
        log_id: String,
        progress: IngestReport,
        #[source]
        source: DatabaseError,
    },
}

impl IngestError {
    /// Progress made before the failure.
    #[must_use]
    pub const fn progress(&self) -> &IngestReport {
        match self {
            Self::Fetch { progress, .. } | Self::Insert { progress, .. } => progress,
        }
    }
}
