//! Log entry writes and reads.

use trawl_core::LogEntry;

use crate::LogStore;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, row_to_entry};

/// What an upsert did with the entry it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was written.
    Inserted,
    /// A row with the same `log_id` already existed and was left untouched.
    Duplicate,
}

impl UpsertOutcome {
    #[must_use]
    pub const fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

impl LogStore {
    /// Write one entry unless its `log_id` is already stored.
    ///
    /// An existing row is never modified, whatever the incoming fields.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Insert`] if the sink rejects the write for
    /// any reason other than the duplicate key.
    pub async fn upsert(&self, entry: &LogEntry) -> Result<UpsertOutcome, DatabaseError> {
        let size = i64::try_from(entry.encoded_size).map_err(|_| {
            DatabaseError::Query(format!(
                "size {} of log {} does not fit a column",
                entry.encoded_size, entry.id
            ))
        })?;

        let changed = self
            .conn
            .execute(
                "INSERT INTO logs (log_id, date, type, size) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (log_id) DO NOTHING",
                libsql::params![
                    entry.id.as_str(),
                    format_datetime(&entry.timestamp),
                    entry.category.as_str(),
                    size
                ],
            )
            .await
            .map_err(|source| DatabaseError::Insert {
                log_id: entry.id.clone(),
                source,
            })?;

        let outcome = if changed == 0 {
            UpsertOutcome::Duplicate
        } else {
            UpsertOutcome::Inserted
        };
        tracing::trace!(log_id = %entry.id, ?outcome, "upserted log");
        Ok(outcome)
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count(&self) -> Result<u64, DatabaseError> {
        let mut rows = self.conn.query("SELECT COUNT(*) FROM logs", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|_| DatabaseError::Query(format!("negative count {count}")))
    }

    /// Whether an entry with this id is stored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn contains(&self, log_id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT 1 FROM logs WHERE log_id = ?1", [log_id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Fetch a stored entry by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row is corrupt.
    pub async fn get(&self, log_id: &str) -> Result<Option<LogEntry>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT log_id, date, type, size FROM logs WHERE log_id = ?1",
                [log_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    /// Id of the most recent stored entry, the checkpoint a new run resumes from.
    ///
    /// Ties on `date` are broken by numeric `log_id` order (longer ids are
    /// larger). Returns `None` for an empty sink.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn latest_log_id(&self) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT log_id FROM logs
                 ORDER BY date DESC, length(log_id) DESC, log_id DESC
                 LIMIT 1",
                (),
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }
}
