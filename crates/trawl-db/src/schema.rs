//! Schema bootstrap.
//!
//! Embeds the table definition at compile time and executes it on every
//! open. All statements use `IF NOT EXISTS`, so re-running is a no-op.

use crate::LogStore;
use crate::error::DatabaseError;

/// `logs` table keyed on `log_id`, plus a `date` index for checkpoint reads.
const LOGS_SCHEMA: &str = include_str!("../schema/logs.sql");

impl LogStore {
    /// Create the sink table and index if they do not exist yet.
    pub(crate) async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(LOGS_SCHEMA)
            .await
            .map_err(|e| DatabaseError::Schema(format!("logs: {e}")))?;
        Ok(())
    }
}
