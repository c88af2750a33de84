//! Site content model.
//!
//! Every CRUD-managed collection goes through one generic abstraction:
//! [`CollectionKind`] names the collection (and its URL segment and storage
//! key) while [`CollectionEntity`] gives each record type its validation
//! rules. Stored records are JSON documents so persistence adapters stay
//! collection-agnostic; the domain re-validates a document through its typed
//! entity on every write.

mod about;
mod entities;
mod icon;
mod seed;
mod slug;
mod snapshot;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

pub use about::{AboutData, AboutPatch};
pub use entities::{
    Achievement, Blog, Client, Feature, RATING_MAX, RATING_MIN, Specification, TeamMember,
    Testimonial, ValueItem,
};
pub use icon::IconName;
pub use seed::{ContentSeed, ContentSeedError};
pub use slug::normalise_slug;
pub use snapshot::{AboutSnapshot, ContentSnapshot};

/// Named CRUD collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Specifications,
    Features,
    Achievements,
    Values,
    Team,
    Testimonials,
    Clients,
    Blogs,
}

impl CollectionKind {
    /// Every collection, in the order the site client loads them.
    pub const ALL: [Self; 8] = [
        Self::Specifications,
        Self::Features,
        Self::Achievements,
        Self::Values,
        Self::Team,
        Self::Testimonials,
        Self::Clients,
        Self::Blogs,
    ];

    /// URL path segment and storage key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Specifications => "specifications",
            Self::Features => "features",
            Self::Achievements => "achievements",
            Self::Values => "values",
            Self::Team => "team",
            Self::Testimonials => "testimonials",
            Self::Clients => "clients",
            Self::Blogs => "blogs",
        }
    }

    /// Resolve a storage key back to its collection.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }

    /// Validate and normalise a record body against this collection's entity.
    pub fn normalise(self, body: Value) -> Result<Value, ContentValidationError> {
        match self {
            Self::Specifications => normalise_as::<Specification>(body),
            Self::Features => normalise_as::<Feature>(body),
            Self::Achievements => normalise_as::<Achievement>(body),
            Self::Values => normalise_as::<ValueItem>(body),
            Self::Team => normalise_as::<TeamMember>(body),
            Self::Testimonials => normalise_as::<Testimonial>(body),
            Self::Clients => normalise_as::<Client>(body),
            Self::Blogs => normalise_as::<Blog>(body),
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed record body belonging to one collection.
pub trait CollectionEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the entity is stored in.
    const KIND: CollectionKind;

    /// Check required fields and normalise derived values in place.
    fn validate(&mut self) -> Result<(), ContentValidationError>;
}

/// Reasons a record body is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    /// The body (or patch) was not a JSON object.
    #[error("record body must be a JSON object")]
    NotAnObject,
    /// A field had the wrong type or an unknown enum value.
    #[error("malformed record: {message}")]
    Malformed { message: String },
    /// A required field was missing or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// Testimonial rating outside `1..=5`.
    #[error("rating must be between {RATING_MIN} and {RATING_MAX}, got {value}")]
    RatingOutOfRange { value: u8 },
    /// Blog slug normalised to nothing.
    #[error("slug must contain at least one letter or digit")]
    EmptySlug,
}

impl ContentValidationError {
    /// Field the error refers to, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } => Some(field),
            Self::RatingOutOfRange { .. } => Some("rating"),
            Self::EmptySlug => Some("slug"),
            Self::NotAnObject | Self::Malformed { .. } => None,
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotAnObject => "not_an_object",
            Self::Malformed { .. } => "malformed",
            Self::MissingField { .. } => "missing_field",
            Self::RatingOutOfRange { .. } => "rating_out_of_range",
            Self::EmptySlug => "empty_slug",
        }
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ContentValidationError> {
    if value.trim().is_empty() {
        return Err(ContentValidationError::MissingField { field });
    }
    Ok(())
}

/// Round-trip `body` through `T`, applying its validation rules.
///
/// Unknown fields are dropped and missing ones take their defaults.
pub fn normalise_as<T: CollectionEntity>(body: Value) -> Result<Value, ContentValidationError> {
    if !body.is_object() {
        return Err(ContentValidationError::NotAnObject);
    }
    let mut entity: T =
        serde_json::from_value(body).map_err(|err| ContentValidationError::Malformed {
            message: err.to_string(),
        })?;
    entity.validate()?;
    serde_json::to_value(&entity).map_err(|err| ContentValidationError::Malformed {
        message: err.to_string(),
    })
}

/// Identifier of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a path segment; `None` when it is not a UUID.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored record: identifier plus normalised body (a JSON object without
/// an `id` field).
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    pub id: RecordId,
    pub body: Value,
}

impl ContentDocument {
    /// Pair an identifier with a body.
    pub fn new(id: RecordId, body: Value) -> Self {
        Self { id, body }
    }

    /// Wire representation: the body with `id` prepended.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut record = Map::new();
        record.insert("id".to_owned(), Value::String(self.id.to_string()));
        if let Value::Object(fields) = &self.body {
            for (key, value) in fields {
                if key != "id" {
                    record.insert(key.clone(), value.clone());
                }
            }
        }
        Value::Object(record)
    }

    /// String field of the body, if present.
    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }
}

/// Overlay the top-level fields of `patch` onto `stored`.
///
/// Identifier fields in the patch (`id`, `_id`) are ignored.
pub fn merge_patch(stored: &Value, patch: Value) -> Result<Value, ContentValidationError> {
    let Value::Object(patch_fields) = patch else {
        return Err(ContentValidationError::NotAnObject);
    };
    let mut merged = match stored {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    for (key, value) in patch_fields {
        if key == "id" || key == "_id" {
            continue;
        }
        merged.insert(key, value);
    }
    Ok(Value::Object(merged))
}

#[cfg(test)]
mod tests;
