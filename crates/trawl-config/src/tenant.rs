//! Identity-platform tenant endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TenantConfig {
    /// Tenant domain (e.g., `acme.eu.auth0.com`). All endpoints derive from it.
    #[serde(default)]
    pub domain: String,

    /// Override for the log query endpoint.
    #[serde(default)]
    pub logs_endpoint: String,

    /// Override for the OAuth token endpoint.
    #[serde(default)]
    pub token_url: String,

    /// Override for the management API audience.
    #[serde(default)]
    pub audience: String,
}

impl TenantConfig {
    /// Check if endpoints can be resolved.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty() || (!self.logs_endpoint.is_empty() && !self.token_url.is_empty())
    }

    /// Log query endpoint, e.g. `https://acme.eu.auth0.com/api/v2/logs`.
    #[must_use]
    pub fn logs_endpoint(&self) -> String {
        self.or_derived(&self.logs_endpoint, "/api/v2/logs")
    }

    /// OAuth token endpoint, e.g. `https://acme.eu.auth0.com/oauth/token`.
    #[must_use]
    pub fn token_url(&self) -> String {
        self.or_derived(&self.token_url, "/oauth/token")
    }

    /// Management API audience, e.g. `https://acme.eu.auth0.com/api/v2/`.
    #[must_use]
    pub fn audience(&self) -> String {
        self.or_derived(&self.audience, "/api/v2/")
    }

    fn or_derived(&self, explicit: &str, path: &str) -> String {
        if explicit.is_empty() {
            format!("https://{}{path}", self.domain.trim_end_matches('/'))
        } else {
            explicit.to_string()
        }
    }
}
