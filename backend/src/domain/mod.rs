//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, the ports that connect them, and the services that
//! implement the driving ports. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, UserAccount, Role: accounts that may sign into the admin panel.
//! - CollectionKind, CollectionEntity: the generic content collection model.
//! - AuthService, ContentService: driving port implementations.

pub mod auth;
pub mod auth_service;
pub mod content;
pub mod content_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthIdentity, LoginCredentials, LoginOutcome, LoginValidationError, PASSWORD_MIN_LEN,
    PasswordChange,
};
pub use self::auth_service::AuthService;
pub use self::content::{
    AboutData, AboutPatch, AboutSnapshot, Achievement, Blog, Client, CollectionEntity,
    CollectionKind, ContentDocument, ContentSeed, ContentSeedError, ContentSnapshot,
    ContentValidationError, Feature, IconName, RATING_MAX, RATING_MIN, RecordId, Specification,
    TeamMember, Testimonial, ValueItem, merge_patch, normalise_as, normalise_slug,
};
pub use self::content_service::ContentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{Email, Role, User, UserAccount, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
