//! In-memory `UserRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, UserAccount, UserId};

/// Accounts held in process memory, keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.user().email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.write().await;
        let email = account.user().email();
        if accounts
            .values()
            .any(|existing| existing.user().email() == email)
        {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        accounts.insert(account.user().id().clone(), account.clone());
        Ok(())
    }

    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError> {
        let mut accounts = self.accounts.write().await;
        let Some(stored) = accounts.get_mut(account.user().id()) else {
            return Ok(false);
        };
        *stored = account.clone();
        Ok(true)
    }
}
