//! Backend entry-point: loads configuration, prepares the stores and serves
//! the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use evstations::inbound::http::auth_config::fingerprint::secret_fingerprint;
use evstations::inbound::http::auth_config::{BuildMode, auth_settings_from_env};
use evstations::inbound::http::health::HealthState;
use evstations::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, ServerSettings, create_server};

/// Apply migrations on a blocking thread; Diesel's harness is synchronous.
async fn migrate(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!("database migrations applied");
    Ok(())
}

async fn connect(settings: &ServerSettings, database_url: &str) -> std::io::Result<DbPool> {
    if settings.run_migrations {
        migrate(database_url).await?;
    }
    let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os()).map_err(|err| {
        error!(error = %err, "failed to load server settings");
        std::io::Error::other(err.to_string())
    })?;

    let auth = auth_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| {
            error!(error = %err, "refusing to start without valid auth configuration");
            std::io::Error::other(err)
        })?;
    info!(
        secret_fingerprint = %secret_fingerprint(&auth.secret),
        bcrypt_cost = auth.bcrypt_cost,
        "token signing secret loaded"
    );

    let mut config = ServerConfig::new(settings.bind_addr()?, auth);
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }
    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(server::default_metrics());
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;

    let draining = health_state.clone();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested; failing liveness while draining");
            draining.mark_unhealthy();
        }
    });

    server.await
}
