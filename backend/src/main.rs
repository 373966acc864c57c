//! Backend entry-point: loads settings, wires adapters, and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, run_pending_migrations};
use backend::outbound::token::{JwtHandler, secret_fingerprint};
use backend::settings::AppSettings;
use server::{ServerConfig, create_server};

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
    let jwt = settings.jwt_properties()?;
    let tokens = JwtHandler::new(&jwt).wrap_err("invalid JWT settings")?;
    info!(
        issuer = %jwt.issuer,
        algorithm = ?tokens.algorithm(),
        secret_fingerprint = %secret_fingerprint(jwt.secret_key.as_bytes()),
        "token signing configured"
    );

    let mut config = ServerConfig::new(settings.bind_addr()?, Arc::new(tokens));
    if let Some(pool_config) = settings.pool_config() {
        run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply migrations")?;
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!("server started");
    server.await.wrap_err("server terminated with an error")
}
