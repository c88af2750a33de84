//! Driving port for the signed-in user's own account.

use async_trait::async_trait;

use crate::domain::{Email, Error, PasswordChange, Role, User, UserId};

/// Domain use-case port for profile reads and self-service edits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Current state of the account behind a verified token.
    async fn me(&self, user_id: &UserId) -> Result<User, Error>;

    /// Replace the account's avatar URL.
    async fn update_avatar(&self, user_id: &UserId, avatar: &str) -> Result<User, Error>;

    /// Verify the current password and store a hash of the new one.
    async fn change_password(&self, user_id: &UserId, change: &PasswordChange)
    -> Result<(), Error>;
}

/// Fixture account service that echoes the requested id back as an admin.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountService;

impl FixtureAccountService {
    fn user(user_id: &UserId) -> Result<User, Error> {
        let email = Email::new("admin@healthspire.example")
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(User::new(user_id.clone(), email, Role::Admin))
    }
}

#[async_trait]
impl AccountService for FixtureAccountService {
    async fn me(&self, user_id: &UserId) -> Result<User, Error> {
        Self::user(user_id)
    }

    async fn update_avatar(&self, user_id: &UserId, avatar: &str) -> Result<User, Error> {
        Ok(Self::user(user_id)?.with_avatar(avatar))
    }

    async fn change_password(
        &self,
        _user_id: &UserId,
        _change: &PasswordChange,
    ) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_the_requested_user() {
        let id = UserId::random();
        let user = FixtureAccountService.me(&id).await.expect("fixture user");
        assert_eq!(user.id(), &id);
        assert_eq!(user.avatar(), "");

        let updated = FixtureAccountService
            .update_avatar(&id, "/uploads/me.png")
            .await
            .expect("avatar update");
        assert_eq!(updated.avatar(), "/uploads/me.png");
    }
}
