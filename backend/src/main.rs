//! Users API entry-point: loads settings, builds the pool, and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, create_server, drain_on_shutdown, shutdown_signal};
use users_api::inbound::http::health::HealthState;
use users_api::inbound::http::state::HttpState;
use users_api::outbound::persistence::{DbPool, DieselUserRepository, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let config = settings.validate()?;
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::default_metrics());

    if config.run_migrations() {
        run_pending_migrations(config.pool().database_url())
            .await
            .wrap_err("failed to apply database migrations")?;
    }

    let pool = DbPool::new(config.pool().clone())
        .await
        .wrap_err("failed to connect to the database")?;
    let http_state = HttpState::from_repository(Arc::new(DieselUserRepository::new(pool)));

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = config.bind_addr();
    let server = create_server(health_state.clone(), http_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    actix_web::rt::spawn(drain_on_shutdown(
        shutdown_signal(),
        health_state,
        server.handle(),
    ));
    info!(%bind_addr, "users API listening");
    server.await.wrap_err("server terminated with an error")
}
