use serde::{Deserialize, Serialize};
use trawl_config::TrawlConfig;

use crate::error::AuthError;

/// Everything the OAuth client-credentials grant needs.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    pub scope: String,
}

impl ClientCredentials {
    /// Resolve credentials and endpoints from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` if the client id or secret is missing.
    pub fn from_config(config: &TrawlConfig) -> Result<Self, AuthError> {
        if !config.auth.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        Ok(Self {
            token_url: config.tenant.token_url(),
            client_id: config.auth.client_id.clone(),
            client_secret: config.auth.client_secret.clone(),
            audience: config.tenant.audience(),
            scope: config.auth.scope.clone(),
        })
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
    grant_type: &'static str,
    scope: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Exchange client credentials for a bearer token.
///
/// The token is returned as an opaque string; it is never stored.
///
/// # Errors
///
/// - `AuthError::Request` on transport failure.
/// - `AuthError::Rejected` if the token service answers with a non-success status.
/// - `AuthError::MalformedToken` if the body is not a token response or the
///   token is empty.
pub async fn fetch_token(
    http: &reqwest::Client,
    credentials: &ClientCredentials,
) -> Result<String, AuthError> {
    let body = TokenRequest {
        client_id: &credentials.client_id,
        client_secret: &credentials.client_secret,
        audience: &credentials.audience,
        grant_type: "client_credentials",
        scope: &credentials.scope,
    };

    let resp = http.post(&credentials.token_url).json(&body).send().await?;
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "token service rejected client credentials");
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body: text,
        });
    }

    let token: TokenResponse =
        serde_json::from_str(&text).map_err(|e| AuthError::MalformedToken(e.to_string()))?;
    if token.access_token.is_empty() {
        return Err(AuthError::MalformedToken("empty access_token".into()));
    }

    tracing::debug!(token_type = token.token_type.as_deref().unwrap_or("-"), "obtained access token");
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> TrawlConfig {
        let mut config = TrawlConfig::default();
        config.tenant.domain = "acme.eu.auth0.com".into();
        config.auth.client_id = "cid".into();
        config.auth.client_secret = "csecret".into();
        config
    }

    #[test]
    fn from_config_derives_endpoints() {
        let creds = ClientCredentials::from_config(&configured()).unwrap();
        assert_eq!(creds.token_url, "https://acme.eu.auth0.com/oauth/token");
        assert_eq!(creds.audience, "https://acme.eu.auth0.com/api/v2/");
        assert_eq!(creds.scope, "read:logs");
    }

    #[test]
    fn from_config_requires_credentials() {
        let mut config = configured();
        config.auth.client_id.clear();
        assert!(matches!(
            ClientCredentials::from_config(&config),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn token_request_serializes_grant() {
        let body = TokenRequest {
            client_id: "a",
            client_secret: "b",
            audience: "c",
            grant_type: "client_credentials",
            scope: "read:logs",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["grant_type"], "client_credentials");
        assert_eq!(json["client_id"], "a");
        assert_eq!(json["scope"], "read:logs");
    }
}
