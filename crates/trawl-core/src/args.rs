//! Parsing of the single positional argument the CLI accepts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::CoreError;

/// Human-readable list of the accepted date-time layouts.
pub const VALID_DATE_FORMATS: &str = "Please provide a date-time argument in one of the following formats:

 - yyyy-MM-dd
 - yyyy-MM-dd HH:mm
 - yyyy-MM-dd HH:mm:ss
";

const DATE_LAYOUT: &str = "%Y-%m-%d";
const DATE_TIME_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a date-time argument, interpreted as UTC.
///
/// Accepts `2024-11-14`, `2024-11-14 12:12` and `2024-11-14 12:12:00`
/// exactly: zero-padded fields, one space, nothing around them.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDateFormat`] for any other input.
pub fn parse_date_argument(input: &str) -> Result<DateTime<Utc>, CoreError> {
    let date = NaiveDate::parse_from_str(input, DATE_LAYOUT)
        .ok()
        .filter(|date| date.format(DATE_LAYOUT).to_string() == input);
    if let Some(date) = date {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| {
            NaiveDateTime::parse_from_str(input, layout)
                .ok()
                .filter(|naive| naive.format(layout).to_string() == input)
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::InvalidDateFormat {
            input: input.to_string(),
        })
}

/// Validate a numeric starting log id.
///
/// # Errors
///
/// Returns [`CoreError::InvalidLogId`] if the input is empty or contains
/// anything other than ASCII digits.
pub fn parse_log_id(input: &str) -> Result<String, CoreError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidLogId(input.to_string()));
    }
    Ok(input.to_string())
}
