//! In-memory `ContentRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ContentPersistenceError, ContentRepository};
use crate::domain::{AboutData, CollectionKind, ContentDocument, ContentSeed, RecordId};

#[derive(Debug, Default)]
struct State {
    collections: HashMap<CollectionKind, Vec<ContentDocument>>,
    about: Option<AboutData>,
}

impl State {
    /// Mirrors the partial unique index on blog slugs in the SQL schema.
    fn slug_taken(&self, kind: CollectionKind, document: &ContentDocument) -> bool {
        if kind != CollectionKind::Blogs {
            return false;
        }
        let Some(slug) = document.field_str("slug") else {
            return false;
        };
        self.collections.get(&kind).is_some_and(|records| {
            records
                .iter()
                .any(|other| other.id != document.id && other.field_str("slug") == Some(slug))
        })
    }
}

/// Content store held in process memory. Lists keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    state: RwLock<State>,
}

impl InMemoryContentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_conflict() -> ContentPersistenceError {
    ContentPersistenceError::conflict("content_documents_blog_slug_key")
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list(
        &self,
        kind: CollectionKind,
    ) -> Result<Vec<ContentDocument>, ContentPersistenceError> {
        let state = self.state.read().await;
        Ok(state.collections.get(&kind).cloned().unwrap_or_default())
    }

    async fn find(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<Option<ContentDocument>, ContentPersistenceError> {
        let state = self.state.read().await;
        Ok(state
            .collections
            .get(&kind)
            .and_then(|records| records.iter().find(|doc| doc.id == *id))
            .cloned())
    }

    async fn insert(
        &self,
        kind: CollectionKind,
        document: &ContentDocument,
    ) -> Result<(), ContentPersistenceError> {
        let mut state = self.state.write().await;
        if state.slug_taken(kind, document) {
            return Err(slug_conflict());
        }
        let records = state.collections.entry(kind).or_default();
        if records.iter().any(|doc| doc.id == document.id) {
            return Err(ContentPersistenceError::conflict("content_documents_pkey"));
        }
        records.push(document.clone());
        Ok(())
    }

    async fn update(
        &self,
        kind: CollectionKind,
        document: &ContentDocument,
    ) -> Result<bool, ContentPersistenceError> {
        let mut state = self.state.write().await;
        if state.slug_taken(kind, document) {
            return Err(slug_conflict());
        }
        let Some(stored) = state
            .collections
            .get_mut(&kind)
            .and_then(|records| records.iter_mut().find(|doc| doc.id == document.id))
        else {
            return Ok(false);
        };
        *stored = document.clone();
        Ok(true)
    }

    async fn delete(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<bool, ContentPersistenceError> {
        let mut state = self.state.write().await;
        let Some(records) = state.collections.get_mut(&kind) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|doc| doc.id != *id);
        Ok(records.len() != before)
    }

    async fn replace_all(&self, seed: &ContentSeed) -> Result<(), ContentPersistenceError> {
        let mut state = self.state.write().await;
        state.collections = seed.collections.iter().cloned().collect();
        state.about = Some(seed.about.clone());
        Ok(())
    }

    async fn load_about(&self) -> Result<Option<AboutData>, ContentPersistenceError> {
        Ok(self.state.read().await.about.clone())
    }

    async fn save_about(&self, about: &AboutData) -> Result<(), ContentPersistenceError> {
        self.state.write().await.about = Some(about.clone());
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, ContentPersistenceError> {
        let state = self.state.read().await;
        Ok(state.about.is_none() && state.collections.values().all(Vec::is_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn doc(body: serde_json::Value) -> ContentDocument {
        ContentDocument::new(RecordId::random(), body)
    }

    #[rstest]
    #[tokio::test]
    async fn lists_keep_insertion_order_across_updates() {
        let repo = InMemoryContentRepository::new();
        let first = doc(json!({"name": "first"}));
        let second = doc(json!({"name": "second"}));
        repo.insert(CollectionKind::Team, &first).await.expect("insert");
        repo.insert(CollectionKind::Team, &second).await.expect("insert");

        let renamed = ContentDocument::new(first.id, json!({"name": "renamed"}));
        assert!(repo.update(CollectionKind::Team, &renamed).await.expect("update"));

        let names: Vec<_> = repo
            .list(CollectionKind::Team)
            .await
            .expect("list")
            .iter()
            .filter_map(|d| d.field_str("name").map(str::to_owned))
            .collect();
        assert_eq!(names, ["renamed", "second"]);
    }

    #[rstest]
    #[tokio::test]
    async fn records_are_scoped_to_their_collection() {
        let repo = InMemoryContentRepository::new();
        let record = doc(json!({"title": "Billing"}));
        repo.insert(CollectionKind::Features, &record).await.expect("insert");

        assert!(
            repo.find(CollectionKind::Specifications, &record.id)
                .await
                .expect("find")
                .is_none()
        );
        assert!(
            !repo
                .delete(CollectionKind::Specifications, &record.id)
                .await
                .expect("delete")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_blog_slugs_conflict() {
        let repo = InMemoryContentRepository::new();
        repo.insert(CollectionKind::Blogs, &doc(json!({"slug": "news"})))
            .await
            .expect("insert");

        let err = repo
            .insert(CollectionKind::Blogs, &doc(json!({"slug": "news"})))
            .await
            .expect_err("slug taken");
        assert!(matches!(err, ContentPersistenceError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_until_something_is_written() {
        let repo = InMemoryContentRepository::new();
        assert!(repo.is_empty().await.expect("is_empty"));

        repo.save_about(&AboutData::default()).await.expect("save");
        assert!(!repo.is_empty().await.expect("is_empty"));
    }
}
