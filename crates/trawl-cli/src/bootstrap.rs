use std::time::Duration;

use anyhow::Context;
use trawl_auth::ClientCredentials;
use trawl_config::TrawlConfig;
use trawl_source::LogClient;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered config files and `TRAWL_*` overrides, then validate.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TrawlConfig> {
    let config = TrawlConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Fetch a bearer token and build a log client that shares its HTTP pool.
pub async fn connect(config: &TrawlConfig) -> anyhow::Result<LogClient> {
    let http = trawl_source::http_client(Duration::from_secs(config.ingest.request_timeout_secs))
        .context("failed to build HTTP client")?;

    let credentials = ClientCredentials::from_config(config)?;
    let token = trawl_auth::fetch_token(&http, &credentials)
        .await
        .context("failed to obtain access token")?;

    Ok(LogClient::with_http(
        http,
        &config.tenant.logs_endpoint(),
        token,
    )?)
}
