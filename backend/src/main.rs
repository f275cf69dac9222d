//! Service entry-point: loads settings, installs logging, connects to the
//! store and serves the user endpoints.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{error, info};

use server::{ServerConfig, create_server};
use user_service::outbound::persistence::{DbPool, PoolConfig};
use user_service::settings::AppSettings;
use user_service::telemetry::init_tracing;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    settings
        .validate()
        .map_err(|err| io::Error::other(format!("invalid configuration: {err}")))?;

    let level = settings.log_level().map_err(io::Error::other)?;
    let environment = settings.environment().map_err(io::Error::other)?;
    if let Err(err) = init_tracing(level, environment) {
        eprintln!("tracing init failed: {err}");
    }

    let database_url = settings.database_url().map_err(io::Error::other)?;
    let pool_config =
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config).await.map_err(|err| {
        error!(error = %err, "database pool construction failed");
        io::Error::other(err)
    })?;
    pool.ping().await.map_err(|err| {
        error!(error = %err, "database unreachable");
        io::Error::other(err)
    })?;

    info!(
        listen_addr = settings.listen_addr(),
        environment = %environment,
        "starting user service"
    );
    create_server(ServerConfig::new(settings.listen_addr(), pool))?.await
}
