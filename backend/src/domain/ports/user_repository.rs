//! Port abstraction for user account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An account with the same email already exists.
        DuplicateEmail { email: String } => "user with email {email} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account by its normalised email.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Store a new account; fails with `DuplicateEmail` when the email is taken.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Overwrite an existing account's avatar and password hash. Returns
    /// `false` when the account no longer exists.
    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError>;
}
