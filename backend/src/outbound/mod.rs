//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for database-less runs and tests
//! - **security**: JWT bearer tokens and Argon2id password hashing
//! - **uploads**: filesystem storage for uploaded images
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
pub mod uploads;
