//! The about-section singleton document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Heading copy and call to action for the about section.
///
/// Achievements and values are separate collections; readers that need the
/// combined view use [`super::AboutSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutData {
    #[schema(example = "About Healthspire")]
    pub heading: String,
    pub subheading: String,
    #[schema(example = "Book a demo")]
    pub cta_text: String,
    #[schema(example = "/contact")]
    pub cta_url: String,
}

/// Partial update of [`AboutData`]; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutPatch {
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
}

impl AboutData {
    /// Apply `patch`, returning the merged document.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AboutData, AboutPatch};
    ///
    /// let about = AboutData { heading: "Old".into(), ..AboutData::default() };
    /// let merged = about.merge(AboutPatch { cta_text: Some("Talk to us".into()), ..AboutPatch::default() });
    /// assert_eq!(merged.heading, "Old");
    /// assert_eq!(merged.cta_text, "Talk to us");
    /// ```
    #[must_use]
    pub fn merge(self, patch: AboutPatch) -> Self {
        let AboutPatch {
            heading,
            subheading,
            cta_text,
            cta_url,
        } = patch;
        Self {
            heading: heading.unwrap_or(self.heading),
            subheading: subheading.unwrap_or(self.subheading),
            cta_text: cta_text.unwrap_or(self.cta_text),
            cta_url: cta_url.unwrap_or(self.cta_url),
        }
    }
}
