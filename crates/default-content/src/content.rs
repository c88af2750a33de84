//! The default content document and its loaders.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::DefaultContentError;
use crate::validation::{ensure_objects, ensure_unique_slugs};

/// Current supported document version.
const SUPPORTED_VERSION: u32 = 1;

/// Content shipped with the binary.
const EMBEDDED: &str = include_str!("../data/default_content.json");

/// Collection keys in load order.
pub const COLLECTION_KEYS: [&str; 8] = [
    "specifications",
    "features",
    "achievements",
    "values",
    "team",
    "testimonials",
    "clients",
    "blogs",
];

/// Seed content for every collection plus the about document.
///
/// Records are kept as raw JSON objects so the backend can apply its own
/// entity validation when seeding.
///
/// # Example
///
/// ```
/// use default_content::DefaultContent;
///
/// let json = r#"{
///     "version": 1,
///     "about": {"heading": "About us"},
///     "clients": [{"name": "Acme Clinic"}]
/// }"#;
///
/// let content = DefaultContent::from_json(json).expect("valid content");
/// assert_eq!(content.collection("clients").map(<[_]>::len), Some(1));
/// assert_eq!(content.collection("blogs").map(<[_]>::len), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultContent {
    version: u32,
    about: Value,
    collections: Vec<(&'static str, Vec<Value>)>,
}

impl DefaultContent {
    /// Load the content compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`DefaultContentError`] if the embedded document fails
    /// validation, which indicates a packaging mistake.
    pub fn embedded() -> Result<Self, DefaultContentError> {
        Self::from_json(EMBEDDED)
    }

    /// Parse a content document from a JSON string.
    ///
    /// Missing collections are treated as empty; a missing `about` section is
    /// an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`DefaultContentError`] if:
    /// - The JSON is malformed or `version` is missing
    /// - The version is unsupported
    /// - `about` or any record is not an object
    /// - A blog lacks a slug or two blogs share one
    pub fn from_json(json: &str) -> Result<Self, DefaultContentError> {
        let raw: RawDefaultContent =
            serde_json::from_str(json).map_err(|e| DefaultContentError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Load a content document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DefaultContentError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, DefaultContentError> {
        let contents = fs::read_to_string(path).map_err(|e| DefaultContentError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawDefaultContent) -> Result<Self, DefaultContentError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(DefaultContentError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let about = match raw.about {
            Value::Null => Value::Object(serde_json::Map::new()),
            Value::Object(fields) => Value::Object(fields),
            _ => {
                return Err(DefaultContentError::NotAnObject {
                    collection: "about".to_owned(),
                    index: 0,
                });
            }
        };

        let collections = vec![
            ("specifications", raw.specifications),
            ("features", raw.features),
            ("achievements", raw.achievements),
            ("values", raw.values),
            ("team", raw.team),
            ("testimonials", raw.testimonials),
            ("clients", raw.clients),
            ("blogs", raw.blogs),
        ];
        for (key, records) in &collections {
            ensure_objects(key, records)?;
        }
        if let Some((_, blogs)) = collections.iter().find(|(key, _)| *key == "blogs") {
            ensure_unique_slugs(blogs)?;
        }

        Ok(Self {
            version: raw.version,
            about,
            collections,
        })
    }

    /// Returns the document version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the about document as a JSON object.
    #[must_use]
    pub const fn about(&self) -> &Value {
        &self.about
    }

    /// Returns the records of the named collection, or `None` for an unknown
    /// key.
    #[must_use]
    pub fn collection(&self, key: &str) -> Option<&[Value]> {
        self.collections
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, records)| records.as_slice())
    }

    /// Iterates over every collection in [`COLLECTION_KEYS`] order.
    pub fn collections(&self) -> impl Iterator<Item = (&'static str, &[Value])> {
        self.collections
            .iter()
            .map(|(name, records)| (*name, records.as_slice()))
    }

    /// Total number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.collections
            .iter()
            .map(|(_, records)| records.len())
            .sum()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefaultContent {
    version: u32,
    #[serde(default)]
    about: Value,
    #[serde(default)]
    specifications: Vec<Value>,
    #[serde(default)]
    features: Vec<Value>,
    #[serde(default)]
    achievements: Vec<Value>,
    #[serde(default)]
    values: Vec<Value>,
    #[serde(default)]
    team: Vec<Value>,
    #[serde(default)]
    testimonials: Vec<Value>,
    #[serde(default)]
    clients: Vec<Value>,
    #[serde(default)]
    blogs: Vec<Value>,
}
