//! Non-visual core of the Healthspire site.
//!
//! - [`Session`]: role and bearer token with explicit start and teardown.
//! - [`Capability`]: the one role check behind every mutating control.
//! - [`ContentStore`]: parallel load of every collection plus guarded CRUD
//!   helpers that splice results into the snapshot.
//! - [`View`]: path routing and document titles.
//! - [`Dashboard`]: admin tabs and inline editors.
//! - [`Conversation`]: the FAQ chatbot.

pub mod api;
pub mod capability;
pub mod chatbot;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod router;
pub mod session;
pub mod store;

pub use api::SiteApi;
pub use capability::{Capability, Role};
pub use chatbot::{Conversation, Faq};
pub use dashboard::{CollectionEditor, Controls, Dashboard, DashboardView, Overview, Tab};
pub use error::ClientError;
pub use model::{
    About, AboutPatch, AccountRole, Achievement, Blog, CARD_TAG_LIMIT, Client, Collection,
    ContentState, Feature, ICON_NAMES, RECENT_POST_LIMIT, Record, Specification, TagPreview,
    TeamMember, Testimonial, UserProfile, ValueItem,
};
pub use router::{BlogDetail, BlogSidebar, View};
pub use session::{InMemoryTokenStore, Session, TokenStore};
pub use store::{ContentStore, Outcome};
