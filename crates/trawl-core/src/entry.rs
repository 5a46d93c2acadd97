//! Audit log entry as returned by the log query API.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// One audit event.
///
/// Only the fields trawl persists are decoded; everything else the source
/// sends is ignored. The serialized form of this struct (field order
/// `date`, `log_id`, `type`) is the canonical encoding that
/// [`encoded_size`](Self::encoded_size) measures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Event time. Source of truth for ordering and date-range queries.
    #[serde(rename = "date", serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,

    /// Globally unique event id, stable across retries.
    #[serde(rename = "log_id")]
    pub id: String,

    /// Short event classification code (e.g. `s`, `fp`, `sapi`).
    #[serde(rename = "type")]
    pub category: String,

    /// Byte length of the canonical encoding. Never read from the source.
    #[serde(skip)]
    pub encoded_size: usize,
}

impl LogEntry {
    /// Build an entry and compute its encoded size.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the canonical encoding fails.
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        category: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        let mut entry = Self {
            timestamp,
            id: id.into(),
            category: category.into(),
            encoded_size: 0,
        };
        entry.encoded_size = entry.canonical_len()?;
        Ok(entry)
    }

    /// Length in bytes of the canonical JSON encoding of this entry.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if encoding fails.
    pub fn canonical_len(&self) -> Result<usize, serde_json::Error> {
        serde_json::to_vec(self).map(|bytes| bytes.len())
    }
}

/// RFC 3339 with the fractional second trimmed of trailing zeros and
/// omitted when zero (`12:12:00.12Z`, `12:12:00Z`), the form the source's
/// own tooling measures.
fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut out = ts.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = ts.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('Z');
    serializer.serialize_str(&out)
}

/// Decode a page body (a JSON array of records) into entries.
///
/// `encoded_size` is recomputed for every decoded entry.
///
/// # Errors
///
/// Returns the `serde_json` error if the body is not an array of records
/// with `date`, `log_id` and `type`.
pub fn decode_page(body: &[u8]) -> Result<Vec<LogEntry>, serde_json::Error> {
    let mut entries: Vec<LogEntry> = serde_json::from_slice(body)?;
    for entry in &mut entries {
        entry.encoded_size = entry.canonical_len()?;
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 14, 12, 12, 0).unwrap()
    }

    #[test]
    fn canonical_encoding_uses_source_field_names() {
        let entry = LogEntry::new("100", ts(), "s").unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-11-14T12:12:00Z","log_id":"100","type":"s"}"#
        );
        assert_eq!(entry.encoded_size, json.len());
    }

    #[test]
    fn decode_page_computes_sizes() {
        let body = br#"[
            {"date": "2024-11-14T12:12:00.123Z", "log_id": "100", "type": "s"},
            {"date": "2024-11-14T12:13:00Z", "log_id": "101", "type": "fp"}
        ]"#;

        let entries = decode_page(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "100");
        assert_eq!(entries[1].category, "fp");
        for entry in &entries {
            assert!(entry.encoded_size > 0);
            assert_eq!(entry.encoded_size, entry.canonical_len().unwrap());
        }
    }

    #[test]
    fn fractional_seconds_are_trimmed_in_canonical_encoding() {
        let body = br#"[
            {"date": "2024-11-14T12:12:00.120Z", "log_id": "100", "type": "s"},
            {"date": "2024-11-14T12:12:00.000Z", "log_id": "101", "type": "s"},
            {"date": "2024-11-14T12:12:00.123456Z", "log_id": "102", "type": "s"}
        ]"#;
        let entries = decode_page(body).unwrap();
        let encoded: Vec<String> = entries
            .iter()
            .map(|e| serde_json::to_string(e).unwrap())
            .collect();

        assert_eq!(
            encoded[0],
            r#"{"date":"2024-11-14T12:12:00.12Z","log_id":"100","type":"s"}"#
        );
        assert_eq!(entries[0].encoded_size, 60);
        assert_eq!(
            encoded[1],
            r#"{"date":"2024-11-14T12:12:00Z","log_id":"101","type":"s"}"#
        );
        assert!(encoded[2].contains(r#""date":"2024-11-14T12:12:00.123456Z""#));
    }

    #[test]
    fn trimmed_encoding_decodes_to_same_instant() {
        let body = br#"[{"date": "2024-11-14T12:12:00.120Z", "log_id": "1", "type": "s"}]"#;
        let entry = decode_page(body).unwrap().remove(0);
        let reencoded = format!("[{}]", serde_json::to_string(&entry).unwrap());
        assert_eq!(decode_page(reencoded.as_bytes()).unwrap(), vec![entry]);
    }

    #[test]
    fn extra_source_fields_do_not_change_size() {
        let plain = br#"[{"date": "2024-11-14T12:12:00Z", "log_id": "7", "type": "s"}]"#;
        let noisy = br#"[{
            "date": "2024-11-14T12:12:00Z",
            "log_id": "7",
            "type": "s",
            "description": "Successful login",
            "client_name": "Dashboard",
            "details": {"prompts": []}
        }]"#;

        let a = decode_page(plain).unwrap();
        let b = decode_page(noisy).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decoded_size_ignores_incoming_size_field() {
        let body = br#"[{"date": "2024-11-14T12:12:00Z", "log_id": "7", "type": "s", "encoded_size": 1}]"#;
        let entries = decode_page(body).unwrap();
        assert_ne!(entries[0].encoded_size, 1);
    }

    #[test]
    fn empty_array_decodes_to_empty_page() {
        assert!(decode_page(b"[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_body_is_rejected() {
        assert!(decode_page(br#"{"statusCode": 401, "error": "Unauthorized"}"#).is_err());
        assert!(decode_page(b"<html>").is_err());
    }

    #[test]
    fn record_missing_log_id_is_rejected() {
        let body = br#"[{"date": "2024-11-14T12:12:00Z", "type": "s"}]"#;
        assert!(decode_page(body).is_err());
    }
}
