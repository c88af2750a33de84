//! Filesystem implementation of the [`UploadStore`] port.
//!
//! Files are written under a configured directory with a fresh UUID name that
//! keeps a sanitised extension of the client's file name. The directory is
//! expected to be served statically under [`PUBLIC_PREFIX`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{UploadStore, UploadStoreError};

/// URL prefix the uploads directory is mounted under.
pub const PUBLIC_PREFIX: &str = "/uploads";

const MAX_EXTENSION_LEN: usize = 10;

/// Writes uploads into a local directory.
#[derive(Debug, Clone)]
pub struct FilesystemUploadStore {
    root: PathBuf,
}

impl FilesystemUploadStore {
    /// Store files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory files are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the uploads directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`UploadStoreError::Write`] when the directory cannot be
    /// created.
    pub async fn ensure_root(&self) -> Result<(), UploadStoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| {
                UploadStoreError::write(format!("create {}: {err}", self.root.display()))
            })
    }
}

/// Lowercased alphanumeric extension of `original_name`, if any survives.
fn sanitised_extension(original_name: &str) -> Option<String> {
    let extension = Path::new(original_name).extension()?.to_str()?;
    let cleaned: String = extension
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_EXTENSION_LEN)
        .collect::<String>()
        .to_ascii_lowercase();
    (!cleaned.is_empty()).then_some(cleaned)
}

fn fresh_file_name(original_name: &str) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    match sanitised_extension(original_name) {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem,
    }
}

#[async_trait]
impl UploadStore for FilesystemUploadStore {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadStoreError> {
        let name = fresh_file_name(original_name);
        let path = self.root.join(&name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| UploadStoreError::write(format!("write {}: {err}", path.display())))?;
        info!(file = %name, size = bytes.len(), "stored upload");
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }
}
