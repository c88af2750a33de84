//! Token signing secret resolution.
//!
//! Release builds require an explicit secret of at least
//! [`SIGNING_KEY_MIN_LEN`] bytes. Debug builds tolerate a missing or short
//! secret, generating an ephemeral one when needed and warning about it.
//! Key material is held in zeroizing buffers and only its fingerprint is
//! logged.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

/// Minimum secret length accepted in release builds.
pub const SIGNING_KEY_MIN_LEN: usize = 32;
const EPHEMERAL_KEY_LEN: usize = 64;
/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for signing key validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require an explicit, strong secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::server::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while resolving the signing secret.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SigningKeyError {
    /// No secret was configured in a release build.
    #[error("HEALTHSPIRE_JWT_SECRET must be set in release builds")]
    Missing,
    /// The configured secret is too short for a release build.
    #[error("HEALTHSPIRE_JWT_SECRET too short: need >= {min_len} bytes, got {length}")]
    TooShort { length: usize, min_len: usize },
}

/// Secret bytes used to sign bearer tokens.
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Truncated SHA-256 fingerprint for logs and runbooks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::server::{BuildMode, resolve_signing_key};
    ///
    /// let key = resolve_signing_key(Some("0123456789abcdef0123456789abcdef"), BuildMode::Release)
    ///     .expect("strong secret");
    /// let fp = key.fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }

    fn ephemeral() -> Self {
        let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_KEY_LEN]);
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningKey").field(&self.fingerprint()).finish()
    }
}

/// Resolve the configured secret into a signing key.
pub fn resolve_signing_key(
    secret: Option<&str>,
    mode: BuildMode,
) -> Result<SigningKey, SigningKeyError> {
    let Some(secret) = secret.filter(|value| !value.is_empty()) else {
        if mode.is_debug() {
            warn!("HEALTHSPIRE_JWT_SECRET not set; using an ephemeral signing key (dev only)");
            return Ok(SigningKey::ephemeral());
        }
        return Err(SigningKeyError::Missing);
    };

    let length = secret.len();
    if length < SIGNING_KEY_MIN_LEN {
        if !mode.is_debug() {
            return Err(SigningKeyError::TooShort {
                length,
                min_len: SIGNING_KEY_MIN_LEN,
            });
        }
        warn!(
            length,
            min_len = SIGNING_KEY_MIN_LEN,
            "HEALTHSPIRE_JWT_SECRET is shorter than recommended"
        );
    }
    Ok(SigningKey(Zeroizing::new(secret.as_bytes().to_vec())))
}
