//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, ContentCommand, ContentQuery, LoginService, TokenCodec, UploadStore,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountService>,
    pub content: Arc<dyn ContentQuery>,
    pub content_commands: Arc<dyn ContentCommand>,
    pub uploads: Arc<dyn UploadStore>,
    pub tokens: Arc<dyn TokenCodec>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountService>,
    pub content: Arc<dyn ContentQuery>,
    pub content_commands: Arc<dyn ContentCommand>,
    pub uploads: Arc<dyn UploadStore>,
    pub tokens: Arc<dyn TokenCodec>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureAccountService, FixtureContentCommand, FixtureContentQuery,
    ///     FixtureLoginService,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::security::JwtTokenCodec;
    /// use backend::outbound::uploads::FilesystemUploadStore;
    /// use mockable::DefaultClock;
    ///
    /// let ports = HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     accounts: Arc::new(FixtureAccountService),
    ///     content: Arc::new(FixtureContentQuery),
    ///     content_commands: Arc::new(FixtureContentCommand),
    ///     uploads: Arc::new(FilesystemUploadStore::new("uploads")),
    ///     tokens: Arc::new(JwtTokenCodec::new(b"secret", Arc::new(DefaultClock))),
    /// };
    /// let state = HttpState::new(ports);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            accounts,
            content,
            content_commands,
            uploads,
            tokens,
        } = ports;
        Self {
            login,
            accounts,
            content,
            content_commands,
            uploads,
            tokens,
        }
    }
}
