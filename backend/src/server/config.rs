//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use users_api::outbound::persistence::PoolConfig;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pool: PoolConfig,
    pub(crate) run_migrations: bool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration binding `bind_addr` with the given pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, pool: PoolConfig) -> Self {
        Self {
            bind_addr,
            pool,
            run_migrations: false,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Apply embedded migrations before the server binds.
    #[must_use]
    pub fn with_migrations(mut self, run_migrations: bool) -> Self {
        self.run_migrations = run_migrations;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the database pool settings.
    #[must_use]
    pub fn pool(&self) -> &PoolConfig {
        &self.pool
    }

    /// Whether migrations run at startup.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
