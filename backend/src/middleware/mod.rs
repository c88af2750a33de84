//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. Currently only request
//! tracing; authentication is an extractor in `inbound::http::auth`.

pub mod trace;

pub use trace::Trace;
