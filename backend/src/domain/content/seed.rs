//! Conversion of the packaged default content into storable documents.

use default_content::DefaultContent;

use super::{AboutData, CollectionKind, ContentDocument, ContentValidationError, RecordId};

/// Failure to turn default content into documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("default {collection} record {index} is invalid: {source}")]
pub struct ContentSeedError {
    /// Collection key (or `about`).
    pub collection: &'static str,
    /// Position of the offending record.
    pub index: usize,
    /// Underlying validation failure.
    #[source]
    pub source: ContentValidationError,
}

/// Validated documents ready to replace the contents of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSeed {
    /// Documents per collection, each with a fresh identifier.
    pub collections: Vec<(CollectionKind, Vec<ContentDocument>)>,
    /// About singleton.
    pub about: AboutData,
}

impl ContentSeed {
    /// Validate every default record through its collection entity and assign
    /// fresh identifiers.
    pub fn from_defaults(defaults: &DefaultContent) -> Result<Self, ContentSeedError> {
        let about = serde_json::from_value(defaults.about().clone()).map_err(|err| {
            ContentSeedError {
                collection: "about",
                index: 0,
                source: ContentValidationError::Malformed {
                    message: err.to_string(),
                },
            }
        })?;

        let mut collections = Vec::with_capacity(CollectionKind::ALL.len());
        for kind in CollectionKind::ALL {
            let records = defaults.collection(kind.as_str()).unwrap_or_default();
            let mut documents = Vec::with_capacity(records.len());
            for (index, record) in records.iter().enumerate() {
                let body = kind
                    .normalise(record.clone())
                    .map_err(|source| ContentSeedError {
                        collection: kind.as_str(),
                        index,
                        source,
                    })?;
                documents.push(ContentDocument::new(RecordId::random(), body));
            }
            collections.push((kind, documents));
        }

        Ok(Self { collections, about })
    }

    /// Documents seeded into `kind`.
    #[must_use]
    pub fn documents(&self, kind: CollectionKind) -> &[ContentDocument] {
        self.collections
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, documents)| documents.as_slice())
            .unwrap_or_default()
    }
}
