//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the content and user repository ports backed
//! by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between rows and domain
//!   types; validation happens in the domain before a write arrives.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map to the ports' error
//!   enums through one shared classifier.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{
//!     DbPool, DieselContentRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/healthspire";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let content = DieselContentRepository::new(pool);
//! # let _ = content;
//! # Ok(())
//! # }
//! ```

mod diesel_content_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_content_repository::DieselContentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
