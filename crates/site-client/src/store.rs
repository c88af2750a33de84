//! Content store: the in-memory snapshot the public site renders.
//!
//! [`ContentStore::load`] fetches every collection in parallel and replaces
//! the snapshot. Mutating helpers are guarded passthroughs: they are skipped
//! unless the session may edit, call the API otherwise, and splice the
//! returned record into the snapshot. Failures are logged and leave the
//! snapshot untouched.

use futures_util::try_join;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::SiteApi;
use crate::error::ClientError;
use crate::model::{
    Achievement, AboutPatch, Blog, Client, ContentState, Feature, Record, Specification,
    TeamMember, Testimonial, ValueItem,
};
use crate::session::Session;

/// Result of a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The API call succeeded and the snapshot reflects it.
    Applied,
    /// The session may not edit; nothing was sent.
    Skipped,
    /// The API call failed; the snapshot is unchanged.
    Failed,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Session-aware content snapshot.
#[derive(Debug)]
pub struct ContentStore {
    api: SiteApi,
    session: Session,
    state: ContentState,
    last_error: Option<String>,
}

impl ContentStore {
    /// Empty store for `session`; call [`ContentStore::load`] to fill it.
    #[must_use]
    pub fn new(api: SiteApi, session: Session) -> Self {
        Self {
            api,
            session,
            state: ContentState::default(),
            last_error: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ContentState {
        &self.state
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Swap the session, for example after login or logout.
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub const fn api(&self) -> &SiteApi {
        &self.api
    }

    /// Message of the most recent failure, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn note_failure(&mut self, operation: &str, err: &ClientError) {
        error!(operation, error = %err, "content store operation failed");
        self.last_error = Some(err.to_string());
    }

    fn failed(&mut self, operation: &str, err: &ClientError) -> Outcome {
        self.note_failure(operation, err);
        Outcome::Failed
    }

    fn edit_token(&self, operation: &str) -> Option<String> {
        let token = self.session.edit_token().map(str::to_owned);
        if token.is_none() {
            warn!(operation, role = ?self.session.role(), "operation not allowed for this session");
        }
        token
    }

    async fn fetch_all(&self) -> Result<ContentState, ClientError> {
        let api = &self.api;
        let (
            specifications,
            features,
            about,
            achievements,
            values,
            team,
            testimonials,
            clients,
            blogs,
        ) = try_join!(
            api.list::<Specification>(),
            api.list::<Feature>(),
            api.about(),
            api.list::<Achievement>(),
            api.list::<ValueItem>(),
            api.list::<TeamMember>(),
            api.list::<Testimonial>(),
            api.list::<Client>(),
            api.list::<Blog>(),
        )?;
        let mut state = ContentState {
            specifications,
            features,
            team,
            testimonials,
            clients,
            blogs,
            ..ContentState::default()
        };
        state.about.merge_fields(about);
        state.about.achievements = achievements;
        state.about.values = values;
        Ok(state)
    }

    /// Fetch every collection in parallel and replace the snapshot.
    pub async fn load(&mut self) -> Outcome {
        match self.fetch_all().await {
            Ok(state) => {
                self.state = state;
                self.last_error = None;
                Outcome::Applied
            }
            Err(err) => self.failed("load", &err),
        }
    }

    /// Create `record` and append the stored copy.
    pub async fn create<T: Record>(&mut self, record: &T) -> Outcome {
        let Some(token) = self.edit_token("create") else {
            return Outcome::Skipped;
        };
        match self.api.create(&token, record).await {
            Ok(stored) => {
                info!(collection = %T::COLLECTION, id = stored.id(), "record created");
                self.state.push(stored);
                self.last_error = None;
                Outcome::Applied
            }
            Err(err) => self.failed("create", &err),
        }
    }

    /// Merge `patch` into record `id` and replace it with the stored copy.
    pub async fn update<T: Record>(&mut self, id: &str, patch: &impl Serialize) -> Outcome {
        let Some(token) = self.edit_token("update") else {
            return Outcome::Skipped;
        };
        match self.api.update::<T>(&token, id, patch).await {
            Ok(stored) => {
                if !self.state.replace(stored) {
                    warn!(collection = %T::COLLECTION, id, "updated record was not in the snapshot");
                }
                self.last_error = None;
                Outcome::Applied
            }
            Err(err) => self.failed("update", &err),
        }
    }

    /// Delete record `id` and drop it from the snapshot.
    pub async fn delete<T: Record>(&mut self, id: &str) -> Outcome {
        let Some(token) = self.edit_token("delete") else {
            return Outcome::Skipped;
        };
        match self.api.delete(T::COLLECTION, &token, id).await {
            Ok(()) => {
                self.state.remove::<T>(id);
                self.last_error = None;
                Outcome::Applied
            }
            Err(err) => self.failed("delete", &err),
        }
    }

    /// Merge `patch` into the about section.
    pub async fn update_about(&mut self, patch: &AboutPatch) -> Outcome {
        let Some(token) = self.edit_token("update_about") else {
            return Outcome::Skipped;
        };
        match self.api.update_about(&token, patch).await {
            Ok(about) => {
                self.state.about.merge_fields(about);
                self.last_error = None;
                Outcome::Applied
            }
            Err(err) => self.failed("update_about", &err),
        }
    }

    /// Restore the default content on the backend, then reload.
    pub async fn reset(&mut self) -> Outcome {
        let Some(token) = self.edit_token("reset") else {
            return Outcome::Skipped;
        };
        if let Err(err) = self.api.reset(&token).await {
            return self.failed("reset", &err);
        }
        info!("content reset to defaults");
        self.load().await
    }

    /// Upload an image and return its site-relative URL.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotPermitted`] unless the session may edit, otherwise
    /// the API failure (also recorded in [`ContentStore::last_error`]).
    pub async fn upload_image(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let token = self
            .edit_token("upload_image")
            .ok_or(ClientError::NotPermitted)?;
        match self.api.upload(&token, file_name, bytes).await {
            Ok(url) => {
                self.last_error = None;
                Ok(url)
            }
            Err(err) => {
                self.note_failure("upload_image", &err);
                Err(err)
            }
        }
    }
}
