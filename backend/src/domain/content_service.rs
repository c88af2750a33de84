//! Content domain service.
//!
//! Implements the [`ContentQuery`] and [`ContentCommand`] driving ports over
//! a [`ContentRepository`]. Every write is validated through the collection's
//! entity before it reaches the repository, blog slugs are kept unique, and
//! the packaged defaults back both first-start seeding and admin resets.

use std::sync::Arc;

use async_trait::async_trait;
use default_content::DefaultContent;
use futures_util::future::try_join_all;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::domain::ports::{
    ContentCommand, ContentPersistenceError, ContentQuery, ContentRepository,
};
use crate::domain::{
    AboutData, AboutPatch, AboutSnapshot, CollectionKind, ContentDocument, ContentSeed,
    ContentSnapshot, ContentValidationError, Error, RecordId, merge_patch, normalise_slug,
};

const RECORD_NOT_FOUND: &str = "record not found";
const DUPLICATE_SLUG: &str = "blog slug already exists";

/// Content service implementing the query and command driving ports.
#[derive(Clone)]
pub struct ContentService<R> {
    repo: Arc<R>,
    defaults: Arc<DefaultContent>,
}

impl<R> ContentService<R> {
    /// Create a service over `repo` that resets to `defaults`.
    pub fn new(repo: Arc<R>, defaults: Arc<DefaultContent>) -> Self {
        Self { repo, defaults }
    }
}

impl<R> ContentService<R>
where
    R: ContentRepository,
{
    fn map_persistence_error(error: ContentPersistenceError) -> Error {
        match error {
            ContentPersistenceError::Connection { message } => {
                error!(%message, "content store unavailable");
                Error::internal(format!("content store unavailable: {message}"))
            }
            ContentPersistenceError::Query { message } => {
                error!(%message, "content store query failed");
                Error::internal(format!("content store error: {message}"))
            }
            ContentPersistenceError::Conflict { .. } => Error::conflict(DUPLICATE_SLUG),
        }
    }

    fn validation_error(error: &ContentValidationError) -> Error {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": error.field(),
            "code": error.reason(),
        }))
    }

    fn parse_id(id: &str) -> Result<RecordId, Error> {
        RecordId::parse(id).ok_or_else(|| Error::not_found(RECORD_NOT_FOUND))
    }

    async fn documents(&self, kind: CollectionKind) -> Result<Vec<ContentDocument>, Error> {
        self.repo
            .list(kind)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn records(&self, kind: CollectionKind) -> Result<Vec<Value>, Error> {
        Ok(self
            .documents(kind)
            .await?
            .iter()
            .map(ContentDocument::to_json)
            .collect())
    }

    /// Reject `body` when another blog (other than `own_id`) has its slug.
    async fn ensure_unique_slug(&self, body: &Value, own_id: Option<RecordId>) -> Result<(), Error> {
        let Some(slug) = body.get("slug").and_then(Value::as_str) else {
            return Ok(());
        };
        let taken = self
            .documents(CollectionKind::Blogs)
            .await?
            .iter()
            .any(|doc| Some(doc.id) != own_id && doc.field_str("slug") == Some(slug));
        if taken {
            return Err(Error::conflict(DUPLICATE_SLUG).with_details(json!({ "slug": slug })));
        }
        Ok(())
    }

    /// Seed the packaged defaults when the store holds nothing yet.
    ///
    /// Returns whether seeding happened.
    pub async fn seed_if_empty(&self) -> Result<bool, Error> {
        if !self
            .repo
            .is_empty()
            .await
            .map_err(Self::map_persistence_error)?
        {
            return Ok(false);
        }
        self.replace_with_defaults().await?;
        info!("seeded empty content store with default content");
        Ok(true)
    }

    async fn replace_with_defaults(&self) -> Result<(), Error> {
        let seed = ContentSeed::from_defaults(&self.defaults).map_err(|err| {
            error!(error = %err, "default content failed validation");
            Error::internal(err.to_string())
        })?;
        self.repo
            .replace_all(&seed)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> ContentQuery for ContentService<R>
where
    R: ContentRepository,
{
    async fn list(&self, kind: CollectionKind) -> Result<Vec<Value>, Error> {
        self.records(kind).await
    }

    async fn blog_by_slug(&self, slug: &str) -> Result<Value, Error> {
        let wanted = normalise_slug(slug);
        self.documents(CollectionKind::Blogs)
            .await?
            .iter()
            .find(|doc| doc.field_str("slug") == Some(wanted.as_str()))
            .map(ContentDocument::to_json)
            .ok_or_else(|| Error::not_found("blog not found"))
    }

    async fn about(&self) -> Result<AboutData, Error> {
        Ok(self
            .repo
            .load_about()
            .await
            .map_err(Self::map_persistence_error)?
            .unwrap_or_default())
    }

    async fn snapshot(&self) -> Result<ContentSnapshot, Error> {
        let mut lists =
            try_join_all(CollectionKind::ALL.map(|kind| self.records(kind))).await?;
        let about = self.about().await?;
        let mut take = |kind: CollectionKind| {
            CollectionKind::ALL
                .iter()
                .position(|candidate| *candidate == kind)
                .and_then(|index| lists.get_mut(index))
                .map(std::mem::take)
                .unwrap_or_default()
        };
        Ok(ContentSnapshot {
            specifications: take(CollectionKind::Specifications),
            features: take(CollectionKind::Features),
            about: AboutSnapshot {
                about,
                achievements: take(CollectionKind::Achievements),
                values: take(CollectionKind::Values),
            },
            team: take(CollectionKind::Team),
            testimonials: take(CollectionKind::Testimonials),
            clients: take(CollectionKind::Clients),
            blogs: take(CollectionKind::Blogs),
        })
    }
}

#[async_trait]
impl<R> ContentCommand for ContentService<R>
where
    R: ContentRepository,
{
    async fn create(&self, kind: CollectionKind, body: Value) -> Result<Value, Error> {
        let body = kind
            .normalise(body)
            .map_err(|err| Self::validation_error(&err))?;
        if kind == CollectionKind::Blogs {
            self.ensure_unique_slug(&body, None).await?;
        }
        let document = ContentDocument::new(RecordId::random(), body);
        self.repo
            .insert(kind, &document)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(collection = %kind, id = %document.id, "created content record");
        Ok(document.to_json())
    }

    async fn update(&self, kind: CollectionKind, id: &str, patch: Value) -> Result<Value, Error> {
        let id = Self::parse_id(id)?;
        let stored = self
            .repo
            .find(kind, &id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(RECORD_NOT_FOUND))?;
        let body = merge_patch(&stored.body, patch)
            .and_then(|merged| kind.normalise(merged))
            .map_err(|err| Self::validation_error(&err))?;
        if kind == CollectionKind::Blogs {
            self.ensure_unique_slug(&body, Some(id)).await?;
        }
        let document = ContentDocument::new(id, body);
        if !self
            .repo
            .update(kind, &document)
            .await
            .map_err(Self::map_persistence_error)?
        {
            return Err(Error::not_found(RECORD_NOT_FOUND));
        }
        info!(collection = %kind, id = %document.id, "updated content record");
        Ok(document.to_json())
    }

    async fn delete(&self, kind: CollectionKind, id: &str) -> Result<(), Error> {
        let id = Self::parse_id(id)?;
        if !self
            .repo
            .delete(kind, &id)
            .await
            .map_err(Self::map_persistence_error)?
        {
            return Err(Error::not_found(RECORD_NOT_FOUND));
        }
        info!(collection = %kind, id = %id, "deleted content record");
        Ok(())
    }

    async fn update_about(&self, patch: AboutPatch) -> Result<AboutData, Error> {
        let about = self.about().await?.merge(patch);
        self.repo
            .save_about(&about)
            .await
            .map_err(Self::map_persistence_error)?;
        info!("updated about document");
        Ok(about)
    }

    async fn reset(&self) -> Result<(), Error> {
        self.replace_with_defaults().await?;
        info!("reset content to defaults");
        Ok(())
    }
}

#[cfg(test)]
#[path = "content_service_tests.rs"]
mod tests;
