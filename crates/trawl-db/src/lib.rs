//! # trawl-db
//!
//! libSQL storage sink for audit log entries.
//!
//! The sink is a single `logs` table keyed on `log_id`. Writes go through
//! [`LogStore::upsert`], which ignores an entry whose id is already stored:
//! no error, no overwrite. Re-running an ingestion from an earlier starting
//! marker therefore never duplicates rows. Each upsert is its own atomic
//! statement; nothing spans pages.

pub mod error;
pub mod helpers;
mod logs;
mod schema;

pub use error::DatabaseError;
pub use logs::UpsertOutcome;

use libsql::Builder;

/// Handle on the sink, opened once and held for the duration of a run.
pub struct LogStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LogStore {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Creates the schema on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// schema cannot be created.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let store = Self { db, conn };
        store.ensure_schema().await?;
        tracing::debug!(path, "opened log store");
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
