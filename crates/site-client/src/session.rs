//! Session state with explicit start and teardown.
//!
//! A [`Session`] holds the role, the bearer token, and the signed-in
//! profile. The token is mirrored into a [`TokenStore`] so a later run can
//! [`Session::restore`] it.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::api::SiteApi;
use crate::capability::{Capability, Role};
use crate::error::ClientError;
use crate::model::UserProfile;

/// Persists the bearer token between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Process-local [`TokenStore`].
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// The current visitor.
#[derive(Clone)]
pub struct Session {
    role: Role,
    token: Option<String>,
    user: Option<UserProfile>,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Anonymous session; clears nothing.
    #[must_use]
    pub fn guest(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            role: Role::Guest,
            token: None,
            user: None,
            tokens,
        }
    }

    /// Demo session: dashboard access without a credential.
    #[must_use]
    pub fn demo(tokens: Arc<dyn TokenStore>) -> Self {
        tokens.clear();
        Self {
            role: Role::Demo,
            ..Self::guest(tokens)
        }
    }

    /// Sign in and persist the issued token.
    ///
    /// # Errors
    ///
    /// Propagates the API failure; wrong credentials are a 401
    /// [`ClientError::Api`].
    pub async fn login(
        api: &SiteApi,
        tokens: Arc<dyn TokenStore>,
        email: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        let outcome = api.login(email, password).await?;
        tokens.save(&outcome.token);
        info!(user_id = %outcome.user.id, role = ?outcome.user.role, "signed in");
        Ok(Self {
            role: outcome.user.role.into(),
            token: Some(outcome.token),
            user: Some(outcome.user),
            tokens,
        })
    }

    /// Rebuild the session from the stored token.
    ///
    /// Without a token this is a guest session. When the backend rejects the
    /// token (or cannot be reached) the stored token is cleared and the
    /// session falls back to guest.
    pub async fn restore(api: &SiteApi, tokens: Arc<dyn TokenStore>) -> Self {
        let Some(token) = tokens.load() else {
            return Self::guest(tokens);
        };
        match api.me(&token).await {
            Ok(user) => Self {
                role: user.role.into(),
                token: Some(token),
                user: Some(user),
                tokens,
            },
            Err(error) => {
                warn!(%error, "stored session rejected; continuing as guest");
                tokens.clear();
                Self::guest(tokens)
            }
        }
    }

    /// End the session and forget the stored token.
    pub fn logout(&mut self) {
        self.tokens.clear();
        self.role = Role::Guest;
        self.token = None;
        self.user = None;
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn capability(&self) -> Capability {
        Capability::for_role(self.role)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Bearer token for a write, when the session may edit.
    pub(crate) fn edit_token(&self) -> Option<&str> {
        if self.capability().can_edit() {
            self.token()
        } else {
            None
        }
    }

    /// Change the signed-in user's avatar.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotPermitted`] without a credential, otherwise the API
    /// failure.
    pub async fn update_avatar(&mut self, api: &SiteApi, avatar: &str) -> Result<(), ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotPermitted)?;
        let user = api.update_profile(token, avatar).await?;
        self.user = Some(user);
        Ok(())
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotPermitted`] without a credential; a wrong current
    /// password is a 401 [`ClientError::Api`].
    pub async fn change_password(
        &self,
        api: &SiteApi,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotPermitted)?;
        api.change_password(token, current_password, new_password)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn demo_sessions_drop_any_stored_token() {
        let tokens = Arc::new(InMemoryTokenStore::with_token("stale"));
        let session = Session::demo(tokens.clone());

        assert_eq!(session.role(), Role::Demo);
        assert!(session.token().is_none());
        assert!(tokens.load().is_none());
        assert!(session.edit_token().is_none());
    }

    #[rstest]
    fn logout_returns_to_guest() {
        let tokens = Arc::new(InMemoryTokenStore::new());
        let mut session = Session {
            role: Role::Admin,
            token: Some("t".to_owned()),
            user: None,
            tokens: tokens.clone(),
        };
        tokens.save("t");
        assert_eq!(session.edit_token(), Some("t"));

        session.logout();

        assert_eq!(session.role(), Role::Guest);
        assert_eq!(session.capability(), Capability::PublicOnly);
        assert!(tokens.load().is_none());
    }

    #[rstest]
    fn debug_output_redacts_the_token() {
        let session = Session {
            role: Role::Admin,
            token: Some("secret-token".to_owned()),
            user: None,
            tokens: Arc::new(InMemoryTokenStore::new()),
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
    }

    #[rstest]
    #[tokio::test]
    async fn restore_without_a_token_is_a_guest() {
        let api = SiteApi::new(reqwest::Url::parse("http://127.0.0.1:9/").expect("url"))
            .expect("client");
        let session = Session::restore(&api, Arc::new(InMemoryTokenStore::new())).await;
        assert_eq!(session.role(), Role::Guest);
    }
}
