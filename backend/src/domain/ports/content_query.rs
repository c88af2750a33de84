//! Driving port for public content reads.
//!
//! Records cross this port as their wire JSON (`id` plus camelCase fields) so
//! handlers can serialise them without knowing the entity type.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AboutData, CollectionKind, ContentSnapshot, Error};

/// Domain use-case port for reading site content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentQuery: Send + Sync {
    /// Records of one collection in insertion order.
    async fn list(&self, kind: CollectionKind) -> Result<Vec<Value>, Error>;

    /// The blog whose normalised slug matches `slug`.
    async fn blog_by_slug(&self, slug: &str) -> Result<Value, Error>;

    /// The about document; empty strings when never written.
    async fn about(&self) -> Result<AboutData, Error>;

    /// Every collection plus the about document in one response.
    async fn snapshot(&self) -> Result<ContentSnapshot, Error>;
}

/// Fixture query backed by an empty site.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentQuery;

#[async_trait]
impl ContentQuery for FixtureContentQuery {
    async fn list(&self, _kind: CollectionKind) -> Result<Vec<Value>, Error> {
        Ok(Vec::new())
    }

    async fn blog_by_slug(&self, _slug: &str) -> Result<Value, Error> {
        Err(Error::not_found("blog not found"))
    }

    async fn about(&self) -> Result<AboutData, Error> {
        Ok(AboutData::default())
    }

    async fn snapshot(&self) -> Result<ContentSnapshot, Error> {
        Ok(ContentSnapshot::default())
    }
}
