//! Record shapes for every CRUD-managed collection.
//!
//! Each struct is the body of a stored record without its identifier. Missing
//! string fields default to empty and unknown fields (including any `id` or
//! `_id` a client echoes back) are dropped during normalisation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::icon::IconName;
use super::slug::normalise_slug;
use super::{CollectionEntity, CollectionKind, ContentValidationError, require};

/// Product specification card ("solutions" in the admin panel).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Specification {
    pub icon: IconName,
    #[schema(example = "Hospital Management")]
    pub title: String,
    pub description: String,
    #[schema(example = "500+ hospitals")]
    pub stats: String,
}

impl CollectionEntity for Specification {
    const KIND: CollectionKind = CollectionKind::Specifications;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("title", &self.title)
    }
}

/// Feature highlight with a list of benefits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    pub icon: IconName,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
}

impl CollectionEntity for Feature {
    const KIND: CollectionKind = CollectionKind::Features;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("title", &self.title)
    }
}

/// Headline number shown in the about section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    pub icon: IconName,
    #[schema(example = "1M+")]
    pub number: String,
    #[schema(example = "Patients served")]
    pub label: String,
    pub description: String,
}

impl CollectionEntity for Achievement {
    const KIND: CollectionKind = CollectionKind::Achievements;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("label", &self.label)
    }
}

/// Company value shown in the about section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueItem {
    pub icon: IconName,
    pub title: String,
    pub description: String,
}

impl CollectionEntity for ValueItem {
    const KIND: CollectionKind = CollectionKind::Values;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("title", &self.title)
    }
}

/// Team member portrait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub img: String,
}

impl CollectionEntity for TeamMember {
    const KIND: CollectionKind = CollectionKind::Team;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("name", &self.name)
    }
}

/// Lowest accepted testimonial rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted testimonial rating; also the default.
pub const RATING_MAX: u8 = 5;

/// Customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub name: String,
    pub title: String,
    pub organization: String,
    pub content: String,
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub rating: u8,
    /// Initials or an image URL.
    pub avatar: String,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            organization: String::new(),
            content: String::new(),
            rating: RATING_MAX,
            avatar: String::new(),
        }
    }
}

impl CollectionEntity for Testimonial {
    const KIND: CollectionKind = CollectionKind::Testimonials;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("name", &self.name)?;
        if !(RATING_MIN..=RATING_MAX).contains(&self.rating) {
            return Err(ContentValidationError::RatingOutOfRange {
                value: self.rating,
            });
        }
        Ok(())
    }
}

/// Client logo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub name: String,
    pub img: String,
}

impl CollectionEntity for Client {
    const KIND: CollectionKind = CollectionKind::Clients;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("name", &self.name)
    }
}

/// Blog post with rich HTML body and optional SEO overrides.
///
/// `slug` is normalised on every write; uniqueness across the collection is
/// enforced by the content service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Blog {
    pub title: String,
    #[schema(example = "digital-pharmacy-inventory")]
    pub slug: String,
    pub author: String,
    /// Display string, not parsed.
    #[schema(example = "March 3, 2025")]
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_img: Option<String>,
    pub content_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<String>,
}

impl CollectionEntity for Blog {
    const KIND: CollectionKind = CollectionKind::Blogs;

    fn validate(&mut self) -> Result<(), ContentValidationError> {
        require("title", &self.title)?;
        require("slug", &self.slug)?;
        let slug = normalise_slug(&self.slug);
        if slug.is_empty() {
            return Err(ContentValidationError::EmptySlug);
        }
        self.slug = slug;
        Ok(())
    }
}
