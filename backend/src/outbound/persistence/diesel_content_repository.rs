//! PostgreSQL-backed `ContentRepository` implementation using Diesel ORM.
//!
//! Collection records live in `content_documents` as JSONB bodies keyed by
//! collection and id; the about singleton lives in `site_documents`. Listing
//! orders by the insertion sequence so updates keep a record's position.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::ports::{ContentPersistenceError, ContentRepository};
use crate::domain::{AboutData, CollectionKind, ContentDocument, ContentSeed, RecordId};

use super::diesel_error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{ContentDocumentRow, NewContentDocumentRow, SiteDocumentRow};
use super::pool::DbPool;
use super::schema::{content_documents, site_documents};

const ABOUT_KEY: &str = "about";

/// Diesel-backed implementation of the [`ContentRepository`] port.
#[derive(Clone)]
pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn ctors() -> ErrorConstructors<ContentPersistenceError> {
    ErrorConstructors {
        connection: |message| ContentPersistenceError::connection(message),
        query: |message| ContentPersistenceError::query(message),
        unique_violation: |constraint| ContentPersistenceError::conflict(constraint),
    }
}

fn pool_error(error: super::pool::PoolError) -> ContentPersistenceError {
    map_pool_error(error, &ctors())
}

fn diesel_error(error: diesel::result::Error) -> ContentPersistenceError {
    map_diesel_error(error, &ctors())
}

fn row_to_document(row: ContentDocumentRow) -> ContentDocument {
    ContentDocument::new(RecordId::from_uuid(row.id), row.body)
}

fn about_to_json(about: &AboutData) -> Result<serde_json::Value, ContentPersistenceError> {
    serde_json::to_value(about)
        .map_err(|err| ContentPersistenceError::query(format!("encode about document: {err}")))
}

#[async_trait]
impl ContentRepository for DieselContentRepository {
    async fn list(
        &self,
        kind: CollectionKind,
    ) -> Result<Vec<ContentDocument>, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ContentDocumentRow> = content_documents::table
            .filter(content_documents::collection.eq(kind.as_str()))
            .order(content_documents::position.asc())
            .select(ContentDocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn find(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<Option<ContentDocument>, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ContentDocumentRow> = content_documents::table
            .filter(content_documents::collection.eq(kind.as_str()))
            .filter(content_documents::id.eq(id.as_uuid()))
            .select(ContentDocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_document))
    }

    async fn insert(
        &self,
        kind: CollectionKind,
        document: &ContentDocument,
    ) -> Result<(), ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewContentDocumentRow {
            id: *document.id.as_uuid(),
            collection: kind.as_str(),
            body: &document.body,
        };
        diesel::insert_into(content_documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(
        &self,
        kind: CollectionKind,
        document: &ContentDocument,
    ) -> Result<bool, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(
            content_documents::table
                .filter(content_documents::collection.eq(kind.as_str()))
                .filter(content_documents::id.eq(document.id.as_uuid())),
        )
        .set(content_documents::body.eq(&document.body))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<bool, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = diesel::delete(
            content_documents::table
                .filter(content_documents::collection.eq(kind.as_str()))
                .filter(content_documents::id.eq(id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(deleted > 0)
    }

    async fn replace_all(&self, seed: &ContentSeed) -> Result<(), ContentPersistenceError> {
        let about = SiteDocumentRow {
            key: ABOUT_KEY.to_owned(),
            body: about_to_json(&seed.about)?,
        };
        let rows: Vec<NewContentDocumentRow<'_>> = seed
            .collections
            .iter()
            .flat_map(|(kind, documents)| {
                documents.iter().map(move |document| NewContentDocumentRow {
                    id: *document.id.as_uuid(),
                    collection: kind.as_str(),
                    body: &document.body,
                })
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(content_documents::table)
                    .execute(conn)
                    .await?;
                diesel::delete(site_documents::table).execute(conn).await?;
                if !rows.is_empty() {
                    diesel::insert_into(content_documents::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                diesel::insert_into(site_documents::table)
                    .values(&about)
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)?;

        debug!("replaced content store with seed documents");
        Ok(())
    }

    async fn load_about(&self) -> Result<Option<AboutData>, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<SiteDocumentRow> = site_documents::table
            .filter(site_documents::key.eq(ABOUT_KEY))
            .select(SiteDocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|stored| {
            serde_json::from_value(stored.body).map_err(|err| {
                warn!(error = %err, "stored about document could not be decoded");
                ContentPersistenceError::query(format!("decode about document: {err}"))
            })
        })
        .transpose()
    }

    async fn save_about(&self, about: &AboutData) -> Result<(), ContentPersistenceError> {
        let body = about_to_json(about)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(site_documents::table)
            .values(SiteDocumentRow {
                key: ABOUT_KEY.to_owned(),
                body: body.clone(),
            })
            .on_conflict(site_documents::key)
            .do_update()
            .set(site_documents::body.eq(body))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn is_empty(&self) -> Result<bool, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let records: i64 = content_documents::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let singletons: i64 = site_documents::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(records == 0 && singletons == 0)
    }
}
