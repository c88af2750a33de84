//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    FixtureAccountService, FixtureContentCommand, FixtureContentQuery, FixtureLoginService,
    MockUploadStore, TokenCodec,
};
use crate::domain::{Email, Role, User, UserId};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::security::JwtTokenCodec;
use crate::test_support::{FixedClock, TEST_JWT_SECRET};

/// Port bundle backed by fixtures, with a real token codec so bearer
/// headers from [`TestTokens`] verify.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        accounts: Arc::new(FixtureAccountService),
        content: Arc::new(FixtureContentQuery),
        content_commands: Arc::new(FixtureContentCommand),
        uploads: Arc::new(MockUploadStore::new()),
        tokens: Arc::new(JwtTokenCodec::new(TEST_JWT_SECRET, Arc::new(DefaultClock))),
    }
}

/// [`HttpState`] built from [`fixture_ports`].
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports())
}

/// Issues tokens accepted by [`fixture_state`].
pub struct TestTokens;

impl TestTokens {
    fn user(role: Role) -> User {
        let id = UserId::new(FixtureLoginService::USER_ID).expect("fixture id");
        let email = Email::new(FixtureLoginService::EMAIL).expect("fixture email");
        User::new(id, email, role)
    }

    fn issue_with(clock: Arc<dyn Clock>, role: Role) -> String {
        JwtTokenCodec::new(TEST_JWT_SECRET, clock)
            .issue(&Self::user(role))
            .expect("token issued")
    }

    /// A currently valid token for the fixture user with `role`.
    pub fn valid(role: Role) -> String {
        Self::issue_with(Arc::new(DefaultClock), role)
    }

    /// `Authorization` header value carrying [`TestTokens::valid`].
    pub fn header(role: Role) -> String {
        format!("Bearer {}", Self::valid(role))
    }

    /// A token whose validity window closed long ago.
    pub fn expired(role: Role) -> String {
        Self::issue_with(FixedClock::days_from_reference(-30).shared(), role)
    }
}
