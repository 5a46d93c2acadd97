//! Shared HTTP response helpers.
//!
//! Centralizes the status-code check so request construction and response
//! mapping stay separate.

use crate::error::SourceError;

/// Return the response unchanged on success, [`SourceError::Api`] with the
/// status code and body otherwise.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    if !resp.status().is_success() {
        return Err(SourceError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
