//! Page fetching: request construction, body decoding, next-cursor extraction.

use reqwest::header::HeaderMap;
use trawl_core::Cursor;
use trawl_core::entry::decode_page;

use crate::error::SourceError;
use crate::http::check_response;
use crate::{LogClient, Page, link, parse_url};

impl LogClient {
    /// Build the request for one page.
    ///
    /// A continuation cursor is requested verbatim; a start marker queries
    /// the fixed endpoint with `from=<id>&take=<page_size>`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if a continuation URL cannot be
    /// parsed, or [`SourceError::Http`] if the request cannot be built.
    pub fn build_page_request(
        &self,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<reqwest::Request, SourceError> {
        let url = match cursor {
            Cursor::ContinuationToken(url) => parse_url(url)?,
            Cursor::StartMarker(id) => {
                let mut url = self.logs_endpoint.clone();
                url.query_pairs_mut()
                    .append_pair("from", id)
                    .append_pair("take", &page_size.to_string());
                url
            }
        };
        Ok(self.authorized_get(url).build()?)
    }

    /// Fetch one page of log entries at `cursor`.
    ///
    /// `page.next` is `None` when the response carries no `next` link, which
    /// is how the API signals exhaustion.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on transport failure.
    /// - [`SourceError::Api`] on a non-success status.
    /// - [`SourceError::MalformedResponse`] if the body is not an array of
    ///   log records. The body is logged before returning.
    pub async fn fetch_page(&self, cursor: &Cursor, page_size: u32) -> Result<Page, SourceError> {
        let request = self.build_page_request(cursor, page_size)?;
        tracing::debug!(url = %request.url(), "requesting log page");

        let resp = check_response(self.http.execute(request).await?).await?;
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        let page = page_from_parts(&headers, &body).inspect_err(|e| {
            if let SourceError::MalformedResponse { reason, body } = e {
                tracing::error!(%cursor, %reason, %body, "failed to decode log page");
            }
        })?;

        tracing::info!(
            cursor = cursor.kind(),
            entries = page.len(),
            has_next = page.next.is_some(),
            "fetched log page"
        );
        Ok(page)
    }
}

/// Assemble a [`Page`] from response headers and body.
///
/// # Errors
///
/// Returns [`SourceError::MalformedResponse`] carrying the body if it does
/// not decode.
pub fn page_from_parts(headers: &HeaderMap, body: &[u8]) -> Result<Page, SourceError> {
    let entries = decode_page(body).map_err(|e| SourceError::MalformedResponse {
        reason: e.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
    })?;
    Ok(Page {
        entries,
        next: link::next_cursor(headers),
    })
}
