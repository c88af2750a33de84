//! Reqwest-backed HTTP client for the site API.
//!
//! This layer owns transport details only: URL building, bearer headers,
//! status mapping, and JSON decoding. Role checks live in the store.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ClientError;
use crate::model::{
    About, AboutPatch, Blog, Collection, ContentState, Heartbeat, LoginOutcome, Record,
    UserProfile,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_PREVIEW_CHARS: usize = 160;

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Deserialize)]
struct UploadBody {
    url: String,
}

/// Client for one backend instance.
///
/// `base` is the site origin (for example `http://localhost:4000/`); API
/// calls go under `/api` and upload URLs resolve against it.
#[derive(Debug, Clone)]
pub struct SiteApi {
    http: Client,
    base: Url,
}

impl SiteApi {
    /// Build a client with a default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when `base` cannot carry a
    /// path, or [`ClientError::Transport`] when the reqwest client cannot be
    /// constructed.
    pub fn new(base: Url) -> Result<Self, ClientError> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// See [`SiteApi::new`].
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base.to_string(),
            });
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    /// Site origin this client talks to.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a site-relative path such as an upload URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when the join fails.
    pub fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|_| ClientError::InvalidBaseUrl {
            url: format!("{}{path}", self.base),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base.to_string(),
            })?;
            path.pop_if_empty().push("api").extend(segments);
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await?;
        Err(map_status_error(status.as_u16(), &body))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let body = self.send(request).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|error| ClientError::Decode {
            message: error.to_string(),
        })
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.get(self.endpoint(segments)?))
    }

    /// `GET /api/health`.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn health(&self) -> Result<Heartbeat, ClientError> {
        self.json(self.get(&["health"])?).await
    }

    /// `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// Wrong credentials surface as a 401 [`ClientError::Api`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ClientError> {
        let request = self
            .http
            .post(self.endpoint(&["auth", "login"])?)
            .json(&json!({ "email": email, "password": password }));
        self.json(request).await
    }

    /// `GET /api/auth/me`.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn me(&self, token: &str) -> Result<UserProfile, ClientError> {
        self.json(self.get(&["auth", "me"])?.bearer_auth(token)).await
    }

    /// `PATCH /api/auth/me` with a new avatar URL.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn update_profile(&self, token: &str, avatar: &str) -> Result<UserProfile, ClientError> {
        let request = self
            .http
            .patch(self.endpoint(&["auth", "me"])?)
            .bearer_auth(token)
            .json(&json!({ "avatar": avatar }));
        self.json(request).await
    }

    /// `POST /api/auth/change-password`.
    ///
    /// # Errors
    ///
    /// A wrong current password surfaces as a 401 [`ClientError::Api`].
    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        let request = self
            .http
            .post(self.endpoint(&["auth", "change-password"])?)
            .bearer_auth(token)
            .json(&json!({
                "currentPassword": current_password,
                "newPassword": new_password,
            }));
        self.send(request).await.map(drop)
    }

    /// `GET /api/content`: every collection in one call.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn content(&self) -> Result<ContentState, ClientError> {
        self.json(self.get(&["content"])?).await
    }

    /// `GET /api/{collection}`.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn list<T: Record>(&self) -> Result<Vec<T>, ClientError> {
        self.json(self.get(&[T::COLLECTION.path()])?).await
    }

    /// `POST /api/{collection}`; returns the stored record with its id.
    ///
    /// # Errors
    ///
    /// Validation failures surface as 400, duplicate blog slugs as 409.
    pub async fn create<T: Record>(&self, token: &str, record: &T) -> Result<T, ClientError> {
        let request = self
            .http
            .post(self.endpoint(&[T::COLLECTION.path()])?)
            .bearer_auth(token)
            .json(record);
        self.json(request).await
    }

    /// `PATCH /api/{collection}/{id}` with top-level fields to merge.
    ///
    /// # Errors
    ///
    /// Unknown ids surface as 404.
    pub async fn update<T: Record>(
        &self,
        token: &str,
        id: &str,
        patch: &impl Serialize,
    ) -> Result<T, ClientError> {
        let request = self
            .http
            .patch(self.endpoint(&[T::COLLECTION.path(), id])?)
            .bearer_auth(token)
            .json(patch);
        self.json(request).await
    }

    /// `DELETE /api/{collection}/{id}`.
    ///
    /// # Errors
    ///
    /// Unknown ids surface as 404.
    pub async fn delete(&self, collection: Collection, token: &str, id: &str) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(self.endpoint(&[collection.path(), id])?)
            .bearer_auth(token);
        self.send(request).await.map(drop)
    }

    /// `GET /api/blogs/slug/{slug}`.
    ///
    /// # Errors
    ///
    /// Unknown slugs surface as 404.
    pub async fn blog_by_slug(&self, slug: &str) -> Result<Blog, ClientError> {
        self.json(self.get(&["blogs", "slug", slug])?).await
    }

    /// `GET /api/about`; the embedded lists come back empty.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn about(&self) -> Result<About, ClientError> {
        self.json(self.get(&["about"])?).await
    }

    /// `PATCH /api/about`.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn update_about(&self, token: &str, patch: &AboutPatch) -> Result<About, ClientError> {
        let request = self
            .http
            .patch(self.endpoint(&["about"])?)
            .bearer_auth(token)
            .json(patch);
        self.json(request).await
    }

    /// `POST /api/settings/reset`.
    ///
    /// # Errors
    ///
    /// Transport or status failures.
    pub async fn reset(&self, token: &str) -> Result<(), ClientError> {
        let request = self
            .http
            .post(self.endpoint(&["settings", "reset"])?)
            .bearer_auth(token);
        self.send(request).await.map(drop)
    }

    /// `POST /api/uploads`; returns the site-relative URL of the stored file.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn upload(&self, token: &str, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_owned()));
        let request = self
            .http
            .post(self.endpoint(&["uploads"])?)
            .bearer_auth(token)
            .multipart(form);
        let body: UploadBody = self.json(request).await?;
        Ok(body.url)
    }
}

fn map_status_error(status: u16, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { code, message }) => ClientError::Api {
            status,
            code,
            message,
        },
        Err(_) => ClientError::Api {
            status,
            code: String::new(),
            message: body_preview(body),
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(BODY_PREVIEW_CHARS).collect::<String>();
    if compact.chars().count() > BODY_PREVIEW_CHARS {
        format!("{preview}...")
    } else {
        preview
    }
}
