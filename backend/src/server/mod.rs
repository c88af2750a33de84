//! Server construction and middleware wiring.

mod config;
mod settings;
mod signing_key;
mod state_builders;

pub use config::ServerConfig;
pub use settings::{AppSettings, SettingsError};
pub use signing_key::{BuildMode, SIGNING_KEY_MIN_LEN, SigningKey, SigningKeyError, resolve_signing_key};
pub use state_builders::build_http_state;

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::cache_control::no_store_headers;
use crate::inbound::http::configure_api;
use crate::inbound::http::error::{json_error_handler, not_found};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::UploadLimit;
use crate::outbound::uploads::PUBLIC_PREFIX;

/// Everything one worker's [`App`] needs.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub cors_origin: String,
    pub uploads_dir: PathBuf,
    pub max_body_bytes: usize,
}

fn cors(origin: &str) -> Cors {
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Assemble the application: `/api` routes, static uploads, health probes,
/// and (in debug builds) Swagger UI. Unmatched paths get a JSON 404.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        cors_origin,
        uploads_dir,
        max_body_bytes,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::Data::new(UploadLimit(max_body_bytes)))
        .app_data(
            web::JsonConfig::default()
                .limit(max_body_bytes)
                .error_handler(json_error_handler),
        )
        .wrap(no_store_headers())
        .wrap(cors(&cors_origin))
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
        .service(Files::new(PUBLIC_PREFIX, uploads_dir))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}

/// A bound, not yet awaited server.
pub struct BoundServer {
    /// Drive this future to serve requests.
    pub server: Server,
    /// Address actually bound; differs from the configured one for port 0.
    pub local_addr: SocketAddr,
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Builds the domain services over the configured adapters, binds the
/// listener, and marks the health state ready. Actix's own signal handling
/// is disabled; pair the server with [`drain_on_signal`].
///
/// # Errors
/// Propagates [`std::io::Error`] when wiring state, binding the socket, or
/// starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<BoundServer> {
    let http_state = web::Data::new(build_http_state(&config).await?);
    info!(
        signing_key_fingerprint = %config.signing_key.fingerprint(),
        "token signing key loaded"
    );
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        cors_origin: config.cors_origin.clone(),
        uploads_dir: config.uploads_dir.clone(),
        max_body_bytes: config.max_body_bytes,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .disable_signals()
        .bind(config.bind_addr)?;
    let local_addr = server
        .addrs()
        .first()
        .copied()
        .unwrap_or(config.bind_addr);
    let server = server.run();

    health_state.mark_ready();
    info!(%local_addr, "server listening");
    Ok(BoundServer { server, local_addr })
}

/// Fail liveness, then stop the server once in-flight requests finish.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining server");
    handle.stop(true).await;
    info!("server stopped");
}

/// Wait for SIGINT or SIGTERM, then [`drain`].
pub async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    shutdown_signal().await;
    drain(health_state, handle).await;
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = interrupt() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable; waiting for SIGINT only");
            interrupt().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    interrupt().await;
}

async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "SIGINT handler unavailable");
        std::future::pending::<()>().await;
    }
}
