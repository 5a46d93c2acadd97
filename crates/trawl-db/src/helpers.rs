//! Row-to-entry parsing helpers.
//!
//! Timestamps are stored as fixed-width RFC 3339 text (nanosecond precision,
//! `Z` suffix) so that lexical order in SQL equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use trawl_core::LogEntry;

use crate::error::DatabaseError;

/// Format a timestamp for the `date` column.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a `date` column back into `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not RFC 3339.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a `SELECT log_id, date, type, size` row into a [`LogEntry`].
///
/// # Errors
///
/// Returns `DatabaseError` if a column is missing or holds bad data.
pub fn row_to_entry(row: &libsql::Row) -> Result<LogEntry, DatabaseError> {
    let size = row.get::<i64>(3)?;
    Ok(LogEntry {
        id: row.get::<String>(0)?,
        timestamp: parse_datetime(&row.get::<String>(1)?)?,
        category: row.get::<String>(2)?,
        encoded_size: usize::try_from(size)
            .map_err(|_| DatabaseError::Query(format!("negative size {size}")))?,
    })
}
