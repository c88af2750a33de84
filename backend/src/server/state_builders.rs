//! Builders wiring domain services over the configured adapters.

use std::sync::Arc;

use default_content::DefaultContent;
use mockable::DefaultClock;
use tracing::info;

use crate::domain::ports::{ContentRepository, UserRepository};
use crate::domain::{AuthService, ContentService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryContentRepository, InMemoryUserRepository};
use crate::outbound::persistence::{DieselContentRepository, DieselUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};
use crate::outbound::uploads::FilesystemUploadStore;

use super::ServerConfig;

/// Build HTTP state over Diesel adapters when a pool is configured, otherwise
/// over the in-memory store.
///
/// Seeds the default content (packaged, or the configured defaults file) into
/// an empty store and creates the uploads directory.
///
/// # Errors
/// Returns [`std::io::Error`] when the defaults cannot be loaded or seeded or
/// the uploads directory cannot be created.
pub async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "building HTTP state");
            assemble(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselContentRepository::new(pool.clone())),
                config,
            )
            .await
        }
        None => {
            info!(storage = "memory", "building HTTP state");
            assemble(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryContentRepository::new()),
                config,
            )
            .await
        }
    }
}

fn load_defaults(config: &ServerConfig) -> std::io::Result<DefaultContent> {
    let defaults = match &config.defaults_file {
        Some(path) => DefaultContent::from_file(path),
        None => DefaultContent::embedded(),
    }
    .map_err(|err| std::io::Error::other(format!("default content: {err}")))?;
    info!(
        source = config
            .defaults_file
            .as_deref()
            .map_or_else(|| "embedded".to_owned(), |path| path.display().to_string()),
        records = defaults.record_count(),
        "default content loaded"
    );
    Ok(defaults)
}

async fn assemble<U, C>(
    users: Arc<U>,
    content: Arc<C>,
    config: &ServerConfig,
) -> std::io::Result<HttpState>
where
    U: UserRepository + 'static,
    C: ContentRepository + 'static,
{
    let defaults = load_defaults(config)?;
    let content_service = Arc::new(ContentService::new(content, Arc::new(defaults)));
    content_service
        .seed_if_empty()
        .await
        .map_err(|err| std::io::Error::other(format!("seeding content: {}", err.message())))?;

    let tokens = Arc::new(JwtTokenCodec::new(
        config.signing_key.as_bytes(),
        Arc::new(DefaultClock),
    ));
    let mut auth = AuthService::new(users, Arc::new(Argon2PasswordHasher::new()), tokens.clone());
    if let Some(seed_admin) = config.seed_admin.clone() {
        auth = auth.with_seed_admin(seed_admin);
    }
    let auth = Arc::new(auth);

    let uploads = FilesystemUploadStore::new(config.uploads_dir.clone());
    uploads
        .ensure_root()
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    Ok(HttpState::new(HttpStatePorts {
        login: auth.clone(),
        accounts: auth,
        content: content_service.clone(),
        content_commands: content_service,
        uploads: Arc::new(uploads),
        tokens,
    }))
}
