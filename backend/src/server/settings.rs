//! Process settings loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `USERS_API_*` environment variables,
//! and an optional configuration file, then validated into a
//! [`ServerConfig`].

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use users_api::outbound::persistence::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, PoolConfig};

use super::ServerConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Raw settings before validation.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection before failing a request.
    pub pool_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

/// Reasons settings cannot be turned into a server configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database URL is not configured; set USERS_API_DATABASE_URL or --database-url")]
    MissingDatabaseUrl,
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
    #[error("cannot resolve bind address {host}:{port}: {source}")]
    BindAddress {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

impl AppSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }

    pub fn pool_timeout(&self) -> Duration {
        self.pool_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CONNECTION_TIMEOUT)
    }

    /// Check required values and resolve the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] naming the offending setting.
    pub fn validate(&self) -> Result<ServerConfig, SettingsError> {
        let database_url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;

        if self.pool_max_size() == 0 {
            return Err(SettingsError::EmptyPool);
        }

        let bind_addr = resolve_bind_addr(self.host(), self.port())?;
        let pool = PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size())
            .with_connection_timeout(self.pool_timeout());

        Ok(ServerConfig::new(bind_addr, pool).with_migrations(self.run_migrations))
    }
}

fn resolve_bind_addr(host: &str, port: u16) -> Result<SocketAddr, SettingsError> {
    let bind_error = |source| SettingsError::BindAddress {
        host: host.to_owned(),
        port,
        source,
    };
    (host, port)
        .to_socket_addrs()
        .map_err(bind_error)?
        .next()
        .ok_or_else(|| bind_error(std::io::Error::other("no addresses resolved")))
}
