//! UI-shaped content records and the generic collection abstraction.
//!
//! Records mirror the backend's camelCase JSON. Identifiers are accepted as
//! either `id` or `_id`. Optional strings the site renders verbatim default
//! to empty so views never branch on presence.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Icon names the site renders, in picker order.
pub const ICON_NAMES: [&str; 19] = [
    "Hospital",
    "Pill",
    "FlaskConical",
    "Shield",
    "BarChart3",
    "UserCheck",
    "Stethoscope",
    "MessageCircle",
    "FileText",
    "TrendingUp",
    "Clock",
    "Smartphone",
    "Database",
    "Users",
    "Globe",
    "Award",
    "Target",
    "TrendingUpIcon",
    "Heart",
];

/// Role attached to an account by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    Demo,
}

/// The signed-in account as returned by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub role: AccountRole,
    #[serde(default)]
    pub avatar: String,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserProfile,
}

/// Heartbeat returned by `/api/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Heartbeat {
    pub ok: bool,
    pub ts: i64,
}

/// Backend collection addressed by a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Specifications,
    Features,
    Achievements,
    Values,
    Team,
    Testimonials,
    Clients,
    Blogs,
}

impl Collection {
    /// Path segment under `/api`.
    #[must_use]
    pub const fn path(self) -> &'static str {
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
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A record type stored in one backend collection and one list of
/// [`ContentState`].
///
/// Every CRUD helper in the store and every dashboard editor is written once
/// against this trait.
pub trait Record:
    Serialize + DeserializeOwned + Clone + Default + std::fmt::Debug + Send + Sync + 'static
{
    /// Backend collection holding records of this type.
    const COLLECTION: Collection;

    /// Server-assigned identifier; empty for drafts.
    fn id(&self) -> &str;

    /// The list of this type inside `state`.
    fn list(state: &ContentState) -> &[Self];

    /// Mutable access to the list of this type inside `state`.
    fn list_mut(state: &mut ContentState) -> &mut Vec<Self>;
}

macro_rules! record {
    ($ty:ident, $collection:ident, $($field:ident).+) => {
        impl Record for $ty {
            const COLLECTION: Collection = Collection::$collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn list(state: &ContentState) -> &[Self] {
                &state.$($field).+
            }

            fn list_mut(state: &mut ContentState) -> &mut Vec<Self> {
                &mut state.$($field).+
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Specification {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    pub title: String,
    pub description: String,
    pub stats: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    pub number: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueItem {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub role: String,
    pub img: String,
}

/// Customer quote; `rating` is 1 to 5 and defaults to 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub title: String,
    pub organization: String,
    pub content: String,
    pub rating: u8,
    /// Initials or an image URL.
    pub avatar: String,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            title: String::new(),
            organization: String::new(),
            content: String::new(),
            rating: 5,
            avatar: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub img: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blog {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: String,
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

/// Tags shown on a blog card.
pub const CARD_TAG_LIMIT: usize = 3;

/// Posts listed in the blog sidebar.
pub const RECENT_POST_LIMIT: usize = 5;

/// The leading tags of a post plus a count of the ones left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPreview<'a> {
    pub shown: &'a [String],
    pub hidden: usize,
}

impl TagPreview<'_> {
    /// `"+N more"` when tags were left off.
    #[must_use]
    pub fn more_label(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("+{} more", self.hidden))
    }
}

impl Blog {
    /// First `limit` tags in stored order.
    ///
    /// # Examples
    /// ```
    /// use site_client::Blog;
    ///
    /// let blog = Blog {
    ///     tags: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
    ///     ..Blog::default()
    /// };
    /// let preview = blog.tag_preview(3);
    /// assert_eq!(preview.shown, ["a", "b", "c"]);
    /// assert_eq!(preview.more_label().as_deref(), Some("+2 more"));
    /// ```
    #[must_use]
    pub fn tag_preview(&self, limit: usize) -> TagPreview<'_> {
        let (shown, rest) = self.tags.split_at(limit.min(self.tags.len()));
        TagPreview {
            shown,
            hidden: rest.len(),
        }
    }
}

record!(Specification, Specifications, specifications);
record!(Feature, Features, features);
record!(Achievement, Achievements, about.achievements);
record!(ValueItem, Values, about.values);
record!(TeamMember, Team, team);
record!(Testimonial, Testimonials, testimonials);
record!(Client, Clients, clients);
record!(Blog, Blogs, blogs);

/// The about section with its embedded achievements and values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub heading: String,
    pub subheading: String,
    pub cta_text: String,
    pub cta_url: String,
    pub achievements: Vec<Achievement>,
    pub values: Vec<ValueItem>,
}

impl About {
    /// Take the singleton fields from `fields`, keeping the embedded lists.
    pub fn merge_fields(&mut self, fields: Self) {
        self.heading = fields.heading;
        self.subheading = fields.subheading;
        self.cta_text = fields.cta_text;
        self.cta_url = fields.cta_url;
    }
}

/// Partial update of the about singleton; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
}

/// Everything the public site renders, as held by [`crate::ContentStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentState {
    pub specifications: Vec<Specification>,
    pub features: Vec<Feature>,
    pub about: About,
    pub team: Vec<TeamMember>,
    pub testimonials: Vec<Testimonial>,
    pub clients: Vec<Client>,
    pub blogs: Vec<Blog>,
}

impl ContentState {
    /// Blog with exactly this slug.
    #[must_use]
    pub fn blog_by_slug(&self, slug: &str) -> Option<&Blog> {
        self.blogs.iter().find(|blog| blog.slug == slug)
    }

    /// The first `n` posts in stored order.
    #[must_use]
    pub fn recent_blogs(&self, n: usize) -> &[Blog] {
        self.blogs.get(..n).unwrap_or(self.blogs.as_slice())
    }

    /// Every tag used by any post, deduplicated in first-seen order.
    #[must_use]
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.blogs
            .iter()
            .flat_map(|blog| blog.tags.iter().map(String::as_str))
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Append a freshly created record.
    pub fn push<T: Record>(&mut self, record: T) {
        T::list_mut(self).push(record);
    }

    /// Replace the record sharing `record`'s id; returns whether one matched.
    pub fn replace<T: Record>(&mut self, record: T) -> bool {
        let list = T::list_mut(self);
        match list.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove the record with `id`; returns whether one matched.
    pub fn remove<T: Record>(&mut self, id: &str) -> bool {
        let list = T::list_mut(self);
        let before = list.len();
        list.retain(|record| record.id() != id);
        list.len() != before
    }
}
