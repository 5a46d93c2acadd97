//! Ingestion loop tuning.

use serde::{Deserialize, Serialize};

/// Largest page the log query API will return, whatever is requested.
pub const MAX_PAGE_SIZE: u32 = 100;

const fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

const fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Records requested per page (`take`).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
