//! Admin dashboard model: tabs, list-plus-inline-editor state, and the
//! capability-gated controls.

use std::collections::HashSet;

use serde::Serialize;

use crate::capability::Capability;
use crate::model::{
    AboutPatch, Achievement, Blog, Client, ContentState, Feature, Record, Specification,
    TeamMember, Testimonial, ValueItem,
};
use crate::store::{ContentStore, Outcome};

/// Sidebar tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Solutions,
    Features,
    About,
    Values,
    Team,
    Clients,
    Blogs,
    Testimonials,
    Profile,
    Settings,
}

impl Tab {
    pub const ALL: [Self; 11] = [
        Self::Dashboard,
        Self::Solutions,
        Self::Features,
        Self::About,
        Self::Values,
        Self::Team,
        Self::Clients,
        Self::Blogs,
        Self::Testimonials,
        Self::Profile,
        Self::Settings,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Solutions => "Healthcare Solutions",
            Self::Features => "Advanced Features",
            Self::About => "Powered by MINDSPIRE",
            Self::Values => "Our Core Values",
            Self::Team => "Our Team",
            Self::Clients => "Our Clients",
            Self::Blogs => "Blog",
            Self::Testimonials => "Testimonials",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
        }
    }
}

/// Which controls are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub add: bool,
    pub edit: bool,
    pub delete: bool,
    pub reset: bool,
    pub upload: bool,
}

impl Controls {
    #[must_use]
    pub const fn for_capability(capability: Capability) -> Self {
        let enabled = capability.can_edit();
        Self {
            add: enabled,
            edit: enabled,
            delete: enabled,
            reset: enabled,
            upload: enabled,
        }
    }
}

/// Counts on the dashboard overview tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overview {
    pub solutions: usize,
    pub features: usize,
    pub achievements: usize,
    pub values: usize,
    pub team_members: usize,
    pub testimonials: usize,
}

impl Overview {
    #[must_use]
    pub fn from_state(state: &ContentState) -> Self {
        Self {
            solutions: state.specifications.len(),
            features: state.features.len(),
            achievements: state.about.achievements.len(),
            values: state.about.values.len(),
            team_members: state.team.len(),
            testimonials: state.testimonials.len(),
        }
    }
}

/// One collection tab: rows from the snapshot, a per-row editing toggle, and
/// a draft for the "add" form.
#[derive(Debug, Clone)]
pub struct CollectionEditor<T: Record> {
    editing: HashSet<String>,
    /// Bound to the "add" form; cleared after a successful create.
    pub draft: T,
}

impl<T: Record> Default for CollectionEditor<T> {
    fn default() -> Self {
        Self {
            editing: HashSet::new(),
            draft: T::default(),
        }
    }
}

impl<T: Record> CollectionEditor<T> {
    #[must_use]
    pub fn rows(state: &ContentState) -> &[T] {
        T::list(state)
    }

    #[must_use]
    pub fn is_editing(&self, id: &str) -> bool {
        self.editing.contains(id)
    }

    /// Flip the inline editor for row `id`; returns whether it is now open.
    pub fn toggle_editing(&mut self, id: &str) -> bool {
        if self.editing.remove(id) {
            false
        } else {
            self.editing.insert(id.to_owned());
            true
        }
    }

    /// Create the draft; on success the form resets.
    pub async fn submit_draft(&mut self, store: &mut ContentStore) -> Outcome {
        let outcome = store.create(&self.draft).await;
        if outcome.is_applied() {
            self.draft = T::default();
        }
        outcome
    }

    /// Save an inline edit; on success the row's editor closes.
    pub async fn save_row(
        &mut self,
        store: &mut ContentStore,
        id: &str,
        patch: &impl Serialize,
    ) -> Outcome {
        let outcome = store.update::<T>(id, patch).await;
        if outcome.is_applied() {
            self.editing.remove(id);
        }
        outcome
    }

    pub async fn delete_row(&mut self, store: &mut ContentStore, id: &str) -> Outcome {
        let outcome = store.delete::<T>(id).await;
        if outcome.is_applied() {
            self.editing.remove(id);
        }
        outcome
    }
}

/// Profile tab form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub avatar: String,
    pub current_password: String,
    pub new_password: String,
}

/// Dashboard state for one visit.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    tab: Tab,
    pub solutions: CollectionEditor<Specification>,
    pub features: CollectionEditor<Feature>,
    pub about: AboutPatch,
    pub achievements: CollectionEditor<Achievement>,
    pub values: CollectionEditor<ValueItem>,
    pub team: CollectionEditor<TeamMember>,
    pub clients: CollectionEditor<Client>,
    pub blogs: CollectionEditor<Blog>,
    pub testimonials: CollectionEditor<Testimonial>,
    pub profile: ProfileForm,
}

impl Dashboard {
    /// Dashboard for `capability`, or `None` when the session may not open
    /// it.
    #[must_use]
    pub fn open(capability: Capability) -> Option<Self> {
        capability.can_open_dashboard().then(Self::default)
    }

    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Settings tab: restore the default content.
    pub async fn reset_to_defaults(&mut self, store: &mut ContentStore) -> Outcome {
        let outcome = store.reset().await;
        if outcome.is_applied() {
            *self = Self {
                tab: self.tab,
                ..Self::default()
            };
        }
        outcome
    }

    /// About tab: save the heading and call-to-action fields.
    pub async fn save_about(&mut self, store: &mut ContentStore) -> Outcome {
        let outcome = store.update_about(&self.about).await;
        if outcome.is_applied() {
            self.about = AboutPatch::default();
        }
        outcome
    }
}

/// Everything a dashboard screen needs from the store, computed once per
/// render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardView {
    pub controls: Controls,
    pub read_only_banner: bool,
    pub overview: Overview,
}

impl DashboardView {
    #[must_use]
    pub fn of(store: &ContentStore) -> Self {
        let capability = store.session().capability();
        Self {
            controls: Controls::for_capability(capability),
            read_only_banner: capability.is_read_only(),
            overview: Overview::from_state(store.state()),
        }
    }
}
