//! Port for content document persistence.
//!
//! Adapters store opaque JSON bodies keyed by collection and record id; the
//! domain validates bodies before they reach this port, so adapters never
//! interpret record fields beyond the blog slug uniqueness they may enforce.

use async_trait::async_trait;

use crate::domain::{AboutData, CollectionKind, ContentDocument, ContentSeed, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by content repository adapters.
    pub enum ContentPersistenceError {
        /// Store connection could not be established.
        Connection { message: String } => "content store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "content store query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "content store conflict: {message}",
    }
}

/// Persistence port for collection records and the about singleton.
///
/// ## Ordering
/// [`ContentRepository::list`] returns records in insertion order; updates
/// keep a record's position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// All records of `kind` in insertion order.
    async fn list(
        &self,
        kind: CollectionKind,
    ) -> Result<Vec<ContentDocument>, ContentPersistenceError>;

    /// One record by id.
    async fn find(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<Option<ContentDocument>, ContentPersistenceError>;

    /// Append a new record.
    async fn insert(
        &self,
        kind: CollectionKind,
        document: &ContentDocument,
    ) -> Result<(), ContentPersistenceError>;

    /// Replace the body of an existing record. Returns `false` when no record
    /// has the document's id.
    async fn update(
        &self,
        kind: CollectionKind,
        document: &ContentDocument,
    ) -> Result<bool, ContentPersistenceError>;

    /// Remove a record. Returns `false` when no record has `id`.
    async fn delete(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<bool, ContentPersistenceError>;

    /// Drop every record and the about document, then store `seed`.
    async fn replace_all(&self, seed: &ContentSeed) -> Result<(), ContentPersistenceError>;

    /// The about document, or `None` when never written.
    async fn load_about(&self) -> Result<Option<AboutData>, ContentPersistenceError>;

    /// Overwrite the about document.
    async fn save_about(&self, about: &AboutData) -> Result<(), ContentPersistenceError>;

    /// Whether the store holds no records and no about document.
    async fn is_empty(&self) -> Result<bool, ContentPersistenceError>;
}
