//! Port for issuing and verifying bearer tokens.

use crate::domain::{AuthIdentity, User};

use super::define_port_error;

define_port_error! {
    /// Token issuing and verification failures.
    pub enum TokenError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed or its signature does not verify.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token's expiry is in the past.
        Expired => "token has expired",
    }
}

/// Signed, time-limited credential codec.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a token embedding the user's id, email, and role.
    fn issue(&self, user: &User) -> Result<String, TokenError>;

    /// Decode and verify a token, returning the embedded identity.
    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError>;
}
