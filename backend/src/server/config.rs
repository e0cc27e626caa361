//! Application settings and the server configuration built from them.
//!
//! [`AppSettings`] is loaded through OrthoConfig from `MEDAPI_*` environment
//! variables (or matching CLI flags). [`ServerConfig`] holds the resolved
//! values and the adapters that must be created before the server starts.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use url::Url;

use medication_api::inbound::http::session_config::SessionSettings;
use medication_api::outbound::openfda::{OpenFdaMedicationRepository, OpenFdaSetupError};
use medication_api::outbound::password::DEFAULT_BCRYPT_COST;
use medication_api::outbound::persistence::{DbPool, PoolConfig, PoolError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_OPENFDA_BASE_URL: &str = "https://api.fda.gov/";
const DEFAULT_OPENFDA_TIMEOUT_SECS: u64 = 10;

/// Raw settings as supplied by the environment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEDAPI")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Base URL of the openFDA API.
    pub openfda_base_url: Option<String>,
    /// Optional openFDA API key for higher rate limits.
    pub openfda_api_key: Option<String>,
    /// Per-request timeout for openFDA calls.
    pub openfda_timeout_secs: Option<u64>,
    /// PostgreSQL URL; accounts are kept in memory when absent.
    pub database_url: Option<String>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
}

/// Errors raised while turning settings into a server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid openFDA base URL '{value}': {source}")]
    BaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build openFDA client: {0}")]
    OpenFda(#[from] OpenFdaSetupError),
    #[error("failed to connect to the database: {0}")]
    Database(#[from] PoolError),
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| ConfigError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn openfda_base_url(&self) -> Result<Url, ConfigError> {
        let value = self
            .openfda_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENFDA_BASE_URL);
        Url::parse(value).map_err(|source| ConfigError::BaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    pub fn openfda_timeout(&self) -> Duration {
        Duration::from_secs(
            self.openfda_timeout_secs
                .unwrap_or(DEFAULT_OPENFDA_TIMEOUT_SECS),
        )
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) openfda: OpenFdaMedicationRepository,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) bcrypt_cost: u32,
}

impl ServerConfig {
    /// Build the configuration, creating the openFDA client and, when a
    /// database URL is set, the connection pool.
    pub async fn from_settings(
        settings: &AppSettings,
        session: SessionSettings,
    ) -> Result<Self, ConfigError> {
        let bind_addr = settings.bind_addr()?;
        let openfda = OpenFdaMedicationRepository::new(
            &settings.openfda_base_url()?,
            settings.openfda_api_key.clone(),
            settings.openfda_timeout(),
        )?;
        let db_pool = match settings.database_url() {
            Some(url) => Some(DbPool::new(PoolConfig::new(url)).await?),
            None => {
                info!("no database URL configured; accounts are kept in memory");
                None
            }
        };
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;

        Ok(Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
            openfda,
            db_pool,
            bcrypt_cost: settings.bcrypt_cost(),
        })
    }
}
