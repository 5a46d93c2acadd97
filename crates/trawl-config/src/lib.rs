//! # trawl-config
//!
//! Layered configuration loading for trawl using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRAWL_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.trawl/config.toml`
//! 4. User-level `~/.config/trawl/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRAWL_AUTH__CLIENT_SECRET` -> `auth.client_secret`,
//! `TRAWL_TENANT__DOMAIN` -> `tenant.domain`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use trawl_config::TrawlConfig;
//!
//! let config = TrawlConfig::load_with_dotenv(None).expect("config");
//! config.validate().expect("complete config");
//! println!("logs endpoint: {}", config.tenant.logs_endpoint());
//! ```

mod credentials;
mod database;
mod error;
mod ingest;
mod tenant;

pub use credentials::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use ingest::{IngestConfig, MAX_PAGE_SIZE};
pub use tenant::TenantConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrawlConfig {
    #[serde(default)]
    pub tenant: TenantConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl TrawlConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(extra).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".trawl/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("TRAWL_").split("__"))
    }

    /// Check that everything an ingestion run needs is present and sane.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for a missing tenant or
    /// credentials section, and [`ConfigError::InvalidValue`] for an
    /// out-of-range page size or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tenant.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "tenant".into(),
            });
        }
        if !self.auth.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        if self.ingest.page_size == 0 || self.ingest.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "ingest.page_size".into(),
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }
        if self.ingest.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ingest.request_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trawl").join("config.toml"))
    }
}
