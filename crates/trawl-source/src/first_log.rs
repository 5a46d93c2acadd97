//! One-shot lookup of the first log id at or after a point in time.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::HeaderMap;

use crate::error::SourceError;
use crate::http::check_response;
use crate::{LogClient, page_from_parts};

/// Width of the search window starting at the requested time.
const SEARCH_WINDOW_HOURS: i64 = 12;

const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl LogClient {
    /// Build the lookup request: `q=date:[<from> TO <from+12h>]&per_page=1`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the request cannot be built.
    pub fn build_first_log_request(
        &self,
        from: DateTime<Utc>,
    ) -> Result<reqwest::Request, SourceError> {
        let (start, end) = search_window(from);
        let mut url = self.logs_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &format!("date:[{start} TO {end}]"))
            .append_pair("per_page", "1");
        Ok(self.authorized_get(url).build()?)
    }

    /// Find the id of the first log inside the 12 hour window starting at `from`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FirstLogNotFound`] if the window is empty, and
    /// the usual transport, status and decoding errors otherwise.
    pub async fn first_log_id(&self, from: DateTime<Utc>) -> Result<String, SourceError> {
        let (start, end) = search_window(from);
        tracing::info!(%start, %end, "fetching first log id");

        let request = self.build_first_log_request(from)?;
        let resp = check_response(self.http.execute(request).await?).await?;
        let body = resp.bytes().await?;

        let page = page_from_parts(&HeaderMap::new(), &body).inspect_err(|e| {
            if let SourceError::MalformedResponse { reason, body } = e {
                tracing::error!(%reason, %body, "failed to decode first-log response");
            }
        })?;

        page.entries
            .into_iter()
            .next()
            .map(|entry| entry.id)
            .ok_or(SourceError::FirstLogNotFound {
                from: start,
                to: end,
            })
    }
}

fn search_window(from: DateTime<Utc>) -> (String, String) {
    let to = from + TimeDelta::hours(SEARCH_WINDOW_HOURS);
    (
        from.format(QUERY_TIME_FORMAT).to_string(),
        to.format(QUERY_TIME_FORMAT).to_string(),
    )
}
