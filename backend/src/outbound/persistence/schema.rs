//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Admin-panel accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed, lowercased login email (unique).
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// `admin` or `demo`.
        role -> Varchar,
        /// Avatar URL; empty when unset.
        avatar -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collection records stored as JSONB documents.
    content_documents (id) {
        /// Primary key: record identifier exposed to clients.
        id -> Uuid,
        /// Collection key, e.g. `blogs`.
        collection -> Varchar,
        /// Validated record body without its id.
        body -> Jsonb,
        /// Insertion sequence used for list ordering.
        position -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Singleton documents keyed by name.
    site_documents (key) {
        /// Document name, e.g. `about`.
        key -> Varchar,
        /// Document body.
        body -> Jsonb,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, content_documents, site_documents);
