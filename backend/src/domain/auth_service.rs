//! Authentication and self-service account use-cases.
//!
//! [`AuthService`] implements the [`LoginService`] and [`AccountService`]
//! driving ports over a [`UserRepository`], a [`PasswordHasher`], and a
//! [`TokenCodec`]. The configured seed admin is provisioned lazily on the
//! first login that presents exactly its credentials; from then on the stored
//! hash is authoritative.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountService, LoginService, PasswordHashError, PasswordHasher, TokenCodec,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, LoginOutcome, PasswordChange, Role, User, UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const USER_NOT_FOUND: &str = "user not found";

/// Authentication service implementing the login and account driving ports.
#[derive(Clone)]
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    seed_admin: Option<Arc<LoginCredentials>>,
}

impl<U, H, T> AuthService<U, H, T> {
    /// Create a service without a seed admin; only stored accounts can log in.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            seed_admin: None,
        }
    }

    /// Provision `seed_admin` as an admin account on its first login.
    #[must_use]
    pub fn with_seed_admin(mut self, seed_admin: LoginCredentials) -> Self {
        self.seed_admin = Some(Arc::new(seed_admin));
        self
    }
}

impl<U, H, T> AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        error!(error = %error, "user repository failure");
        match error {
            UserPersistenceError::Connection { message } => {
                Error::internal(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { email } => {
                Error::conflict(format!("user with email {email} already exists"))
            }
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| {
                error!(error = %err, "password hashing failed");
                Error::internal(err.to_string())
            })
    }

    /// `Ok(false)` for a wrong password or an unreadable stored hash.
    async fn password_matches(&self, password: &str, hash: &str) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?;
        match verified {
            Ok(matches) => Ok(matches),
            Err(PasswordHashError::MalformedHash { message }) => {
                warn!(%message, "stored password hash is malformed");
                Ok(false)
            }
            Err(err) => Err(Error::internal(err.to_string())),
        }
    }

    fn is_seed_admin(&self, credentials: &LoginCredentials) -> bool {
        self.seed_admin.as_deref().is_some_and(|seed| {
            seed.email() == credentials.email() && seed.password() == credentials.password()
        })
    }

    /// Create the seed admin account when `credentials` match it exactly.
    async fn provision_seed_admin(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<UserAccount>, Error> {
        if !self.is_seed_admin(credentials) {
            return Ok(None);
        }
        let hash = self.hash_password(credentials.password()).await?;
        let user = User::new(UserId::random(), credentials.email().clone(), Role::Admin);
        let account = UserAccount::new(user, hash);
        match self.users.insert(&account).await {
            Ok(()) => {
                info!(user_id = %account.user().id(), "provisioned seed admin account");
                Ok(Some(account))
            }
            // A concurrent first login won the race; use its account.
            Err(UserPersistenceError::DuplicateEmail { .. }) => self
                .users
                .find_by_email(credentials.email())
                .await
                .map_err(Self::map_user_error),
            Err(err) => Err(Self::map_user_error(err)),
        }
    }

    async fn account(&self, user_id: &UserId) -> Result<UserAccount, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn store(&self, account: &UserAccount) -> Result<(), Error> {
        if self
            .users
            .update(account)
            .await
            .map_err(Self::map_user_error)?
        {
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }
}

#[async_trait]
impl<U, H, T> LoginService for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let stored = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?;
        let account = match stored {
            Some(account) => account,
            None => match self.provision_seed_admin(credentials).await? {
                Some(account) => account,
                None => {
                    debug!("login rejected: unknown email");
                    return Err(Error::unauthorized(INVALID_CREDENTIALS));
                }
            },
        };

        if !self
            .password_matches(credentials.password(), account.password_hash())
            .await?
        {
            warn!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let user = account.into_user();
        let token = self.tokens.issue(&user).map_err(|err| {
            error!(error = %err, "failed to issue token");
            Error::internal(err.to_string())
        })?;
        info!(user_id = %user.id(), role = %user.role(), "login succeeded");
        Ok(LoginOutcome { token, user })
    }
}

#[async_trait]
impl<U, H, T> AccountService for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn me(&self, user_id: &UserId) -> Result<User, Error> {
        Ok(self.account(user_id).await?.into_user())
    }

    async fn update_avatar(&self, user_id: &UserId, avatar: &str) -> Result<User, Error> {
        let account = self.account(user_id).await?.with_avatar(avatar.trim());
        self.store(&account).await?;
        Ok(account.into_user())
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        change: &PasswordChange,
    ) -> Result<(), Error> {
        let account = self.account(user_id).await?;
        if !self
            .password_matches(change.current(), account.password_hash())
            .await?
        {
            warn!(user_id = %user_id, "password change rejected: current password mismatch");
            return Err(Error::unauthorized("current password is incorrect"));
        }
        let hash = self.hash_password(change.new_password()).await?;
        self.store(&account.with_password_hash(hash)).await?;
        info!(user_id = %user_id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
