//! Argon2id implementation of the [`PasswordHasher`] port.

use argon2::password_hash::{self, PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier, Version};
use rand::rngs::OsRng;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Produces PHC-format Argon2id hashes.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Hasher using the recommended Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with minimal memory and time cost for test suites.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] if the parameters are rejected.
    pub fn low_cost() -> Result<Self, PasswordHashError> {
        let params =
            Params::new(8, 1, 1, None).map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::low_cost().expect("valid parameters")
    }

    #[rstest]
    fn hashes_are_salted_argon2id_phc_strings(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("correct horse").expect("hash");
        let second = hasher.hash("correct horse").expect("hash");

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("correct horse", true)]
    #[case("Correct horse", false)]
    #[case("correct horse ", false)]
    fn verification_is_exact(
        hasher: Argon2PasswordHasher,
        #[case] attempt: &str,
        #[case] expected: bool,
    ) {
        let hash = hasher.hash("correct horse").expect("hash");
        assert_eq!(hasher.verify(attempt, &hash).expect("verify"), expected);
    }

    #[rstest]
    fn malformed_hashes_are_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("anything", "plaintext-password")
            .expect_err("not a PHC string");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
