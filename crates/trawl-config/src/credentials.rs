//! Client-credentials grant settings.

use serde::{Deserialize, Serialize};

fn default_scope() -> String {
    "read:logs".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Machine-to-machine application client id.
    #[serde(default)]
    pub client_id: String,

    /// Machine-to-machine application client secret.
    #[serde(default)]
    pub client_secret: String,

    /// Requested scope.
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            scope: default_scope(),
        }
    }
}

impl AuthConfig {
    /// Check if both halves of the client credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
