//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenCodec`],
//! [`UploadStore`]) are implemented by outbound adapters. Driving ports
//! (`*Service`, `Content*`) are implemented by domain services and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod content_command;
mod content_query;
mod content_repository;
mod login_service;
mod password_hasher;
mod token_codec;
mod upload_store;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::{AccountService, FixtureAccountService};
#[cfg(test)]
pub use content_command::MockContentCommand;
pub use content_command::{ContentCommand, FixtureContentCommand};
#[cfg(test)]
pub use content_query::MockContentQuery;
pub use content_query::{ContentQuery, FixtureContentQuery};
#[cfg(test)]
pub use content_repository::MockContentRepository;
pub use content_repository::{ContentPersistenceError, ContentRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
#[cfg(test)]
pub use upload_store::MockUploadStore;
pub use upload_store::{UploadStore, UploadStoreError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
