//! Driving port for content mutations.
//!
//! Callers are expected to have checked the admin role already; the port
//! itself only enforces content rules (validation, slug uniqueness, existence).

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    AboutData, AboutPatch, CollectionKind, ContentDocument, Error, RecordId,
};

/// Domain use-case port for editing site content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentCommand: Send + Sync {
    /// Validate `body`, assign a fresh id, store it, and return the record.
    async fn create(&self, kind: CollectionKind, body: Value) -> Result<Value, Error>;

    /// Merge `patch` over the stored record, re-validate, store, and return it.
    async fn update(&self, kind: CollectionKind, id: &str, patch: Value) -> Result<Value, Error>;

    /// Remove a record.
    async fn delete(&self, kind: CollectionKind, id: &str) -> Result<(), Error>;

    /// Merge `patch` into the about document and return the result.
    async fn update_about(&self, patch: AboutPatch) -> Result<AboutData, Error>;

    /// Replace all content with the packaged defaults.
    async fn reset(&self) -> Result<(), Error>;
}

/// Fixture command that validates and echoes creates but stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentCommand;

#[async_trait]
impl ContentCommand for FixtureContentCommand {
    async fn create(&self, kind: CollectionKind, body: Value) -> Result<Value, Error> {
        let body = kind
            .normalise(body)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(ContentDocument::new(RecordId::random(), body).to_json())
    }

    async fn update(&self, kind: CollectionKind, _id: &str, _patch: Value) -> Result<Value, Error> {
        Err(Error::not_found(format!("{kind} record not found")))
    }

    async fn delete(&self, kind: CollectionKind, _id: &str) -> Result<(), Error> {
        Err(Error::not_found(format!("{kind} record not found")))
    }

    async fn update_about(&self, patch: AboutPatch) -> Result<AboutData, Error> {
        Ok(AboutData::default().merge(patch))
    }

    async fn reset(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn fixture_create_assigns_an_id() {
        let record = FixtureContentCommand
            .create(CollectionKind::Clients, json!({"name": "Acme"}))
            .await
            .expect("valid client");
        assert!(record["id"].as_str().and_then(RecordId::parse).is_some());
        assert_eq!(record["name"], "Acme");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_validates() {
        let err = FixtureContentCommand
            .create(CollectionKind::Clients, json!({}))
            .await
            .expect_err("missing name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
