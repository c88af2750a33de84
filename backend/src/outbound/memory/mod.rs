//! In-process adapters for the persistence ports.
//!
//! Used when no database URL is configured and by the integration suites.
//! State lives behind a `tokio::sync::RwLock` and disappears with the
//! process.

mod content_repository;
mod user_repository;

pub use content_repository::InMemoryContentRepository;
pub use user_repository::InMemoryUserRepository;
