//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{content_documents, site_documents, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub avatar: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub avatar: &'a str,
}

/// Changeset for the self-service account fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub password_hash: &'a str,
    pub avatar: &'a str,
}

/// Row struct for reading collection records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentDocumentRow {
    pub id: Uuid,
    pub body: serde_json::Value,
}

/// Insertable struct for new collection records; `position` is assigned by
/// the database sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = content_documents)]
pub(crate) struct NewContentDocumentRow<'a> {
    pub id: Uuid,
    pub collection: &'a str,
    pub body: &'a serde_json::Value,
}

/// Row struct for singleton documents.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = site_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SiteDocumentRow {
    pub key: String,
    pub body: serde_json::Value,
}
