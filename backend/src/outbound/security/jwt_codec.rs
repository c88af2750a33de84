//! HS256 JSON Web Token implementation of the [`TokenCodec`] port.
//!
//! Tokens carry `sub` (user id), `email`, `role`, `iat`, and `exp`. Expiry is
//! checked against the injected [`Clock`] rather than the system time, with
//! no leeway, so tests can issue tokens in the past.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{AuthIdentity, Email, Role, User, UserId};

/// Validity window of issued tokens.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl JwtTokenCodec {
    /// Create a codec signing with `secret`.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            clock,
            ttl: TimeDelta::days(TOKEN_TTL_DAYS),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry is compared against the injected clock below.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            role: user.role().as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Self::validation()).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        let claims = data.claims;
        if claims.exp < self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        let user_id = UserId::new(&claims.sub)
            .map_err(|err| TokenError::invalid(format!("sub claim: {err}")))?;
        let email = Email::new(&claims.email)
            .map_err(|err| TokenError::invalid(format!("email claim: {err}")))?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|err| TokenError::invalid(format!("role claim: {err}")))?;
        Ok(AuthIdentity {
            user_id,
            email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedClock;
    use rstest::{fixture, rstest};

    fn at(days_offset: i64) -> Arc<dyn Clock> {
        FixedClock::days_from_reference(days_offset).shared()
    }

    #[fixture]
    fn user() -> User {
        User::new(
            UserId::random(),
            Email::new("admin@healthspire.example").expect("email"),
            Role::Admin,
        )
    }

    const SECRET: &[u8] = b"test-secret-with-enough-bytes-for-hs256";

    #[rstest]
    fn issued_tokens_verify_to_the_same_identity(user: User) {
        let codec = JwtTokenCodec::new(SECRET, at(0));
        let token = codec.issue(&user).expect("issue");

        let identity = codec.verify(&token).expect("verify");
        assert_eq!(identity, AuthIdentity::for_user(&user));
    }

    #[rstest]
    #[case(6, true)]
    #[case(7, true)]
    #[case(8, false)]
    fn tokens_expire_after_seven_days(user: User, #[case] days_later: i64, #[case] valid: bool) {
        let token = JwtTokenCodec::new(SECRET, at(0))
            .issue(&user)
            .expect("issue");

        let result = JwtTokenCodec::new(SECRET, at(days_later)).verify(&token);
        if valid {
            result.expect("still valid");
        } else {
            assert_eq!(result.expect_err("expired"), TokenError::Expired);
        }
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid(user: User) {
        let token = JwtTokenCodec::new(b"another-secret", at(0))
            .issue(&user)
            .expect("issue");

        let err = JwtTokenCodec::new(SECRET, at(0))
            .verify(&token)
            .expect_err("bad signature");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    #[case("Bearer abc")]
    fn malformed_tokens_are_invalid(#[case] token: &str) {
        let err = JwtTokenCodec::new(SECRET, at(0))
            .verify(token)
            .expect_err("malformed");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }
}
