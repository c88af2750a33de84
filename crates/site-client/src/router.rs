//! Path router: maps a location path to the view the site shows.

use percent_encoding::percent_decode_str;

use crate::capability::Capability;
use crate::model::{Blog, ContentState, RECENT_POST_LIMIT};

const SITE_NAME: &str = "Healthspire";

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    BlogList,
    /// One post; the slug is already percent-decoded.
    BlogDetail { slug: String },
    Hospital,
    Pharmacy,
    Labs,
    AdminDashboard,
    Login,
}

impl View {
    /// Resolve `path` for a session with `capability`.
    ///
    /// Query strings, fragments, and trailing slashes are ignored. Unknown
    /// paths fall back to [`View::Home`].
    ///
    /// # Examples
    /// ```
    /// use site_client::{Capability, View};
    ///
    /// let view = View::resolve("/blog/lab%20results", Capability::PublicOnly);
    /// assert_eq!(view, View::BlogDetail { slug: "lab results".into() });
    /// assert_eq!(View::resolve("/admin", Capability::PublicOnly), View::Login);
    /// ```
    #[must_use]
    pub fn resolve(path: &str, capability: Capability) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        if let Some(raw) = path.strip_prefix("/blog/") {
            if !raw.is_empty() {
                return Self::BlogDetail {
                    slug: percent_decode_str(raw).decode_utf8_lossy().into_owned(),
                };
            }
        }
        match path {
            "/blog" => Self::BlogList,
            "/hospital" => Self::Hospital,
            "/pharmacy" => Self::Pharmacy,
            "/labs" => Self::Labs,
            "/admin" if capability.can_open_dashboard() => Self::AdminDashboard,
            "/admin" => Self::Login,
            _ => Self::Home,
        }
    }

    /// Short page name used in the document title.
    #[must_use]
    pub const fn page_name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::BlogList | Self::BlogDetail { .. } => "Blog",
            Self::Hospital => "Hospital",
            Self::Pharmacy => "Pharmacy",
            Self::Labs => "Labs",
            Self::AdminDashboard | Self::Login => "Admin",
        }
    }

    /// `"<Page> | Healthspire"`.
    #[must_use]
    pub fn document_title(&self) -> String {
        format!("{} | {SITE_NAME}", self.page_name())
    }
}

/// What a blog detail view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogDetail<'a> {
    Found(&'a Blog),
    NotFound,
}

impl<'a> BlogDetail<'a> {
    /// Look `slug` up in the loaded snapshot.
    #[must_use]
    pub fn resolve(state: &'a ContentState, slug: &str) -> Self {
        state
            .blog_by_slug(slug)
            .map_or(Self::NotFound, Self::Found)
    }
}

/// Sidebar beside a blog post: the leading posts and every tag in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSidebar<'a> {
    pub recent: &'a [Blog],
    pub tags: Vec<&'a str>,
}

impl<'a> BlogSidebar<'a> {
    #[must_use]
    pub fn of(state: &'a ContentState) -> Self {
        Self {
            recent: state.recent_blogs(RECENT_POST_LIMIT),
            tags: state.all_tags(),
        }
    }

    /// Path of a sidebar entry.
    #[must_use]
    pub fn link_for(blog: &Blog) -> String {
        format!("/blog/{}", blog.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", View::Home)]
    #[case("", View::Home)]
    #[case("/blog", View::BlogList)]
    #[case("/blog/", View::BlogList)]
    #[case("/blog/clinic-news", View::BlogDetail { slug: "clinic-news".to_owned() })]
    #[case("/blog/caf%C3%A9-hours?ref=nav", View::BlogDetail { slug: "café-hours".to_owned() })]
    #[case("/hospital", View::Hospital)]
    #[case("/pharmacy/", View::Pharmacy)]
    #[case("/labs#pricing", View::Labs)]
    #[case("/nowhere", View::Home)]
    fn public_paths(#[case] path: &str, #[case] expected: View) {
        assert_eq!(View::resolve(path, Capability::PublicOnly), expected);
    }

    #[rstest]
    #[case(Capability::PublicOnly, View::Login)]
    #[case(Capability::ReadOnlyDashboard, View::AdminDashboard)]
    #[case(Capability::Edit, View::AdminDashboard)]
    fn admin_path_depends_on_capability(#[case] capability: Capability, #[case] expected: View) {
        assert_eq!(View::resolve("/admin", capability), expected);
    }

    #[rstest]
    #[case(View::Home, "Home | Healthspire")]
    #[case(View::BlogDetail { slug: "x".to_owned() }, "Blog | Healthspire")]
    #[case(View::Login, "Admin | Healthspire")]
    #[case(View::Labs, "Labs | Healthspire")]
    fn titles(#[case] view: View, #[case] expected: &str) {
        assert_eq!(view.document_title(), expected);
    }

    #[rstest]
    fn blog_detail_reports_unknown_slugs() {
        let state = ContentState {
            blogs: vec![Blog {
                id: "1".to_owned(),
                slug: "clinic-news".to_owned(),
                ..Blog::default()
            }],
            ..ContentState::default()
        };

        assert!(matches!(
            BlogDetail::resolve(&state, "clinic-news"),
            BlogDetail::Found(blog) if blog.id == "1"
        ));
        assert_eq!(BlogDetail::resolve(&state, "gone"), BlogDetail::NotFound);
    }

    #[rstest]
    fn sidebar_lists_five_posts_and_every_tag() {
        let state = ContentState {
            blogs: (1..=7)
                .zip(["labs", "pharmacy", "hospital"].into_iter().cycle())
                .map(|(n, tag)| Blog {
                    slug: format!("post-{n}"),
                    tags: vec![tag.to_owned(), "clinic".to_owned()],
                    ..Blog::default()
                })
                .collect(),
            ..ContentState::default()
        };

        let sidebar = BlogSidebar::of(&state);

        assert_eq!(sidebar.recent.len(), RECENT_POST_LIMIT);
        assert_eq!(
            sidebar.recent.first().map(BlogSidebar::link_for).as_deref(),
            Some("/blog/post-1")
        );
        assert_eq!(sidebar.tags, ["labs", "clinic", "pharmacy", "hospital"]);
        let link = sidebar.recent.last().map(BlogSidebar::link_for);
        assert_eq!(
            link.as_deref().map(|path| View::resolve(path, Capability::PublicOnly)),
            Some(View::BlogDetail { slug: "post-5".to_owned() })
        );
    }
}
