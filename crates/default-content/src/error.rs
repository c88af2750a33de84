//! Error types for the default-content crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a content document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefaultContentError {
    /// The content file could not be read.
    #[error("failed to read content file at '{path}': {message}")]
    IoError {
        /// Path to the content file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The document is not valid JSON or is missing required sections.
    #[error("invalid content JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The document version is not supported.
    #[error("unsupported content version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the document.
        actual: u32,
    },

    /// A record inside a collection is not a JSON object.
    #[error("record {index} in '{collection}' is not a JSON object")]
    NotAnObject {
        /// Collection key.
        collection: String,
        /// Position of the offending record.
        index: usize,
    },

    /// A blog record has no slug.
    #[error("blog {index} has no slug")]
    MissingSlug {
        /// Position of the offending blog.
        index: usize,
    },

    /// Two blog records share a slug.
    #[error("duplicate blog slug '{slug}'")]
    DuplicateSlug {
        /// The repeated slug.
        slug: String,
    },
}
