//! Port for persisting uploaded files.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised by upload storage adapters.
    pub enum UploadStoreError {
        /// Writing the file failed.
        Write { message: String } => "failed to store upload: {message}",
    }
}

/// Stores uploaded bytes and returns the public URL they are served from.
///
/// Every call produces a new file; identical uploads are not deduplicated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist `bytes`, keeping a sanitised extension from `original_name`.
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadStoreError>;
}
