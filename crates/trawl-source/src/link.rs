//! `Link` response header parsing.
//!
//! The log query API paginates out-of-band: the follow-up URL arrives as
//! `Link: <https://…>; rel="next", <https://…>; rel="prev"`. A missing header
//! or a header without a `next` relation means the stream is exhausted.

use reqwest::header::{HeaderMap, LINK};
use trawl_core::Cursor;

/// Extract the continuation cursor from response headers.
///
/// Every `Link` header value is inspected, in order.
#[must_use]
pub fn next_cursor(headers: &HeaderMap) -> Option<Cursor> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_next_link)
        .map(Cursor::ContinuationToken)
}

/// Find the URL of the descriptor whose relation is `next`.
///
/// Descriptors are comma-separated; the URL is everything before the first
/// `;` with angle brackets and surrounding whitespace stripped.
#[must_use]
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|descriptor| {
        let mut parts = descriptor.split(';');
        let target = parts
            .next()?
            .trim_matches(|c: char| c.is_whitespace() || c == '<' || c == '>');
        if target.is_empty() || !parts.any(is_next_relation) {
            return None;
        }
        Some(target.to_string())
    })
}

/// `rel="next"`, `rel=next`, and space-separated lists such as `rel="next last"`.
fn is_next_relation(param: &str) -> bool {
    let Some((key, value)) = param.split_once('=') else {
        return false;
    };
    key.trim().eq_ignore_ascii_case("rel")
        && value
            .trim()
            .trim_matches('"')
            .split_whitespace()
            .any(|rel| rel.eq_ignore_ascii_case("next"))
}
