//! Database error types for trawl-db.

use thiserror::Error;

/// Errors from sink operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unusable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// A query expected a row and got none.
    #[error("No result returned")]
    NoResult,

    /// Schema bootstrap failed.
    #[error("Schema setup failed: {0}")]
    Schema(String),

    /// The sink rejected a write for a reason other than a duplicate key.
    #[error("Insert of log {log_id} failed: {source}")]
    Insert {
        log_id: String,
        #[source]
        source: libsql::Error,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
