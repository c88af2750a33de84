//! Whole-site content snapshot served by `GET /api/content`.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::about::AboutData;
use super::entities::{
    Achievement, Blog, Client, Feature, Specification, TeamMember, Testimonial, ValueItem,
};

/// About document with its achievements and values embedded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutSnapshot {
    #[serde(flatten)]
    pub about: AboutData,
    #[schema(value_type = Vec<Achievement>)]
    pub achievements: Vec<Value>,
    #[schema(value_type = Vec<ValueItem>)]
    pub values: Vec<Value>,
}

/// Every collection in one document, records in insertion order.
///
/// Records are the stored JSON documents (with `id`) so the snapshot matches
/// the per-collection list endpoints byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    #[schema(value_type = Vec<Specification>)]
    pub specifications: Vec<Value>,
    #[schema(value_type = Vec<Feature>)]
    pub features: Vec<Value>,
    pub about: AboutSnapshot,
    #[schema(value_type = Vec<TeamMember>)]
    pub team: Vec<Value>,
    #[schema(value_type = Vec<Testimonial>)]
    pub testimonials: Vec<Value>,
    #[schema(value_type = Vec<Client>)]
    pub clients: Vec<Value>,
    #[schema(value_type = Vec<Blog>)]
    pub blogs: Vec<Value>,
}
