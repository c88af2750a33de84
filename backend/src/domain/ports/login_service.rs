//! Driving port for login.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing (or importing) the backing infrastructure. HTTP handler
//! tests substitute a fixture or mock instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Email, Error, LoginCredentials, LoginOutcome, Role, User, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return a signed token plus the user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}

/// Deterministic authenticator for handler tests.
///
/// `admin@healthspire.example` / `password` succeeds with a fixed user id and
/// the token `fixture-token`; anything else is unauthorised.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// Email accepted by the fixture.
    pub const EMAIL: &'static str = "admin@healthspire.example";
    /// Password accepted by the fixture.
    pub const PASSWORD: &'static str = "password";
    /// Token returned on success.
    pub const TOKEN: &'static str = "fixture-token";
    /// Identifier of the fixture user.
    pub const USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        if credentials.email().as_ref() != Self::EMAIL || credentials.password() != Self::PASSWORD
        {
            return Err(Error::unauthorized("invalid credentials"));
        }
        let id = UserId::new(Self::USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let email = Email::new(Self::EMAIL)
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(LoginOutcome {
            token: Self::TOKEN.to_owned(),
            user: User::new(id, email, Role::Admin),
        })
    }
}
