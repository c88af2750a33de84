//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::LoginCredentials;
use crate::inbound::http::uploads::DEFAULT_UPLOAD_LIMIT;
use crate::outbound::persistence::DbPool;

use super::signing_key::SigningKey;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) signing_key: SigningKey,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origin: String,
    pub(crate) uploads_dir: PathBuf,
    pub(crate) max_body_bytes: usize,
    pub(crate) seed_admin: Option<LoginCredentials>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) defaults_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Construct a configuration with in-memory storage, any CORS origin,
    /// `./uploads`, and the default body cap.
    #[must_use]
    pub fn new(signing_key: SigningKey, bind_addr: SocketAddr) -> Self {
        Self {
            signing_key,
            bind_addr,
            cors_origin: "*".to_owned(),
            uploads_dir: PathBuf::from("uploads"),
            max_body_bytes: DEFAULT_UPLOAD_LIMIT,
            seed_admin: None,
            db_pool: None,
            defaults_file: None,
        }
    }

    /// Restrict browser access to `origin`; `*` allows any origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }

    /// Store and serve uploads from `dir`.
    #[must_use]
    pub fn with_uploads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.uploads_dir = dir.into();
        self
    }

    /// Cap JSON and upload bodies at `bytes`.
    #[must_use]
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Provision `credentials` as the admin account on first login.
    #[must_use]
    pub fn with_seed_admin(mut self, credentials: LoginCredentials) -> Self {
        self.seed_admin = Some(credentials);
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server keeps users and content in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed and reset from the JSON document at `path` instead of the
    /// packaged defaults.
    #[must_use]
    pub fn with_defaults_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults_file = Some(path.into());
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the uploads directory.
    #[must_use]
    pub fn uploads_dir(&self) -> &std::path::Path {
        &self.uploads_dir
    }
}
