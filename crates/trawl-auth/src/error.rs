use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("client credentials are not configured (set auth.client_id and auth.client_secret)")]
    NotConfigured,

    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed token response: {0}")]
    MalformedToken(String),
}
