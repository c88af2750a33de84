//! Client-side error type.

use thiserror::Error;

/// Failures surfaced by [`crate::SiteApi`] and the session helpers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL cannot carry path segments (for example `mailto:`).
    #[error("base URL cannot be used for API requests: {url}")]
    InvalidBaseUrl { url: String },
    /// The request never produced a response.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// The server answered with a non-success status.
    #[error("{status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
    /// The session's capability does not allow the operation.
    #[error("operation requires an admin session")]
    NotPermitted,
}

impl ClientError {
    /// Whether the server rejected the credential (HTTP 401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Stable error code from the server's error body, when there was one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode {
                message: error.to_string(),
            }
        } else {
            Self::Transport {
                message: error.to_string(),
            }
        }
    }
}
