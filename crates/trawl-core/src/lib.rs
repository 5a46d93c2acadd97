//! # trawl-core
//!
//! Core types shared across all trawl crates:
//! - [`LogEntry`], one audit event with its locally computed encoded size
//! - [`Cursor`], the pagination position (start marker or continuation token)
//! - Command-line argument parsing for date-times and log ids
//! - Cross-cutting error types

pub mod args;
pub mod cursor;
pub mod entry;
pub mod errors;

pub use cursor::Cursor;
pub use entry::LogEntry;
pub use errors::CoreError;
