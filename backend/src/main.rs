//! Backend entry-point: loads settings, wires adapters, and serves the API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::LoginCredentials;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use backend::server::{
    AppSettings, BuildMode, ServerConfig, create_server, drain_on_signal, resolve_signing_key,
};

fn other(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

async fn server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let signing_key =
        resolve_signing_key(settings.jwt_secret.as_deref(), BuildMode::from_debug_assertions())
            .map_err(other)?;
    let mut config = ServerConfig::new(signing_key, settings.bind_addr().map_err(other)?)
        .with_cors_origin(settings.cors_origin())
        .with_uploads_dir(settings.uploads_dir())
        .with_max_body_bytes(settings.max_body_bytes());
    if let Some(path) = &settings.defaults_file {
        config = config.with_defaults_file(path);
    }

    match settings.seed_admin().map_err(other)? {
        Some((email, password)) => {
            let credentials = LoginCredentials::try_from_parts(email, password).map_err(other)?;
            config = config.with_seed_admin(credentials);
        }
        None => warn!("no seed admin configured; only existing accounts can sign in"),
    }

    if let Some(database_url) = settings.database_url.as_deref() {
        run_migrations(database_url).await.map_err(other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(other)?;
        config = config.with_db_pool(pool);
    } else {
        info!("HEALTHSPIRE_DATABASE_URL not set; content is kept in memory");
    }
    Ok(config)
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

    let settings = AppSettings::load().map_err(other)?;
    let config = server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let bound = create_server(health_state.clone(), config).await?;
    actix_web::rt::spawn(drain_on_signal(health_state, bound.server.handle()));
    bound.server.await
}
