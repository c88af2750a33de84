//! Canonical seed content for the Healthspire marketing site.
//!
//! The backend seeds an empty store from this content on first start and
//! restores it when an admin triggers "reset to defaults". The crate is
//! independent of backend domain types to avoid circular dependencies:
//! records are plain JSON objects keyed by collection name.
//!
//! # Example
//!
//! ```
//! use default_content::{COLLECTION_KEYS, DefaultContent};
//!
//! let content = DefaultContent::embedded().expect("embedded content is valid");
//! for key in COLLECTION_KEYS {
//!     assert!(content.collection(key).is_some());
//! }
//! assert!(content.record_count() > 0);
//! ```

mod content;
mod error;
mod validation;

pub use content::{COLLECTION_KEYS, DefaultContent};
pub use error::DefaultContentError;
