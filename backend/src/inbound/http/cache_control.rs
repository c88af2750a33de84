//! Shared cache-control policy for API responses.

use actix_web::http::header::{CACHE_CONTROL, HeaderValue};
use actix_web::middleware::DefaultHeaders;

/// API responses reflect live admin edits and must never be cached.
pub const NO_STORE: &str = "no-store";

/// Middleware adding `Cache-Control: no-store` unless a handler set its own.
pub fn no_store_headers() -> DefaultHeaders {
    DefaultHeaders::new().add((CACHE_CONTROL, HeaderValue::from_static(NO_STORE)))
}
