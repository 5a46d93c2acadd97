//! The two collaborators the loop drives, and their production bindings.

use async_trait::async_trait;
use trawl_core::{Cursor, LogEntry};
use trawl_db::{DatabaseError, LogStore, UpsertOutcome};
use trawl_source::{LogClient, Page, SourceError};

/// Where pages come from.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page at `cursor`. `page.next` is `None` at exhaustion.
    async fn fetch_page(&self, cursor: &Cursor, page_size: u32) -> Result<Page, SourceError>;
}

/// Where entries go. Writes must be idempotent on `LogEntry::id`.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn upsert(&self, entry: &LogEntry) -> Result<UpsertOutcome, DatabaseError>;
}

#[async_trait]
impl PageSource for LogClient {
    async fn fetch_page(&self, cursor: &Cursor, page_size: u32) -> Result<Page, SourceError> {
        Self::fetch_page(self, cursor, page_size).await
    }
}

#[async_trait]
impl LogSink for LogStore {
    async fn upsert(&self, entry: &LogEntry) -> Result<UpsertOutcome, DatabaseError> {
        Self::upsert(self, entry).await
    }
}
