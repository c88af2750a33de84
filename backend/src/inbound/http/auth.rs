//! Bearer-token extractors used by HTTP handlers.
//!
//! Handlers declare the identity they need as an argument: [`AuthenticatedUser`]
//! for any signed-in account and [`AdminUser`] for routes that change site
//! content. Verification goes through the [`TokenCodec`] port held in
//! [`HttpState`], so handlers never touch headers or signing keys.
//!
//! [`TokenCodec`]: crate::domain::ports::TokenCodec

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::ports::TokenError;
use crate::domain::{AuthIdentity, Error};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity decoded from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthIdentity);

impl AuthenticatedUser {
    /// Borrow the decoded identity.
    pub fn identity(&self) -> &AuthIdentity {
        &self.0
    }
}

/// Identity of a signed-in account allowed to edit site content.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthIdentity);

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication required"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("authentication required"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("authentication required"))
}

fn map_token_error(err: TokenError) -> Error {
    match err {
        TokenError::Expired => Error::unauthorized("token expired"),
        TokenError::Invalid { message } => {
            debug!(%message, "rejected bearer token");
            Error::unauthorized("invalid token")
        }
        TokenError::Signing { message } => {
            error!(%message, "token verification failed");
            Error::internal("token verification failed")
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthIdentity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req)?;
    state.tokens.verify(token).map_err(map_token_error)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Self))
    }
}

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|identity| {
            if identity.role.can_edit() {
                Ok(Self(identity))
            } else {
                Err(Error::forbidden("forbidden"))
            }
        }))
    }
}
