//! Drives the site client against a live in-memory backend.

use std::sync::Arc;

use actix_web::web;
use backend::domain::LoginCredentials;
use backend::inbound::http::health::HealthState;
use backend::server::{BuildMode, ServerConfig, create_server, resolve_signing_key};
use backend::test_support::TEST_JWT_SECRET;
use reqwest::Url;
use rstest::rstest;
use serde_json::json;
use site_client::{
    AboutPatch, Blog, Capability, ClientError, ContentStore, Dashboard, DashboardView,
    InMemoryTokenStore, Outcome, Role, Session, SiteApi, TeamMember, TokenStore, View,
};
use tempfile::TempDir;

const ADMIN_EMAIL: &str = "admin@healthspire.example";
const ADMIN_PASSWORD: &str = "correct horse battery";

struct LiveBackend {
    api: SiteApi,
    _uploads: TempDir,
}

async fn start_backend() -> LiveBackend {
    let uploads = TempDir::new().expect("uploads dir");
    let secret = std::str::from_utf8(TEST_JWT_SECRET).expect("ascii secret");
    let key = resolve_signing_key(Some(secret), BuildMode::Release).expect("signing key");
    let config = ServerConfig::new(key, "127.0.0.1:0".parse().expect("address"))
        .with_uploads_dir(uploads.path())
        .with_seed_admin(
            LoginCredentials::try_from_parts(ADMIN_EMAIL, ADMIN_PASSWORD).expect("credentials"),
        );
    let bound = create_server(web::Data::new(HealthState::new()), config)
        .await
        .expect("server starts");
    let base = Url::parse(&format!("http://{}/", bound.local_addr)).expect("base url");
    tokio::spawn(bound.server);
    LiveBackend {
        api: SiteApi::new(base).expect("client"),
        _uploads: uploads,
    }
}

async fn admin_store(api: &SiteApi) -> (ContentStore, Arc<InMemoryTokenStore>) {
    let tokens = Arc::new(InMemoryTokenStore::new());
    let session = Session::login(api, tokens.clone(), ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("admin login");
    (ContentStore::new(api.clone(), session), tokens)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_session_round_trips_and_restores() {
    let backend = start_backend().await;
    assert!(backend.api.health().await.expect("heartbeat").ok);

    let (store, tokens) = admin_store(&backend.api).await;
    assert_eq!(store.session().role(), Role::Admin);
    assert!(tokens.load().is_some());

    let restored = Session::restore(&backend.api, tokens.clone()).await;
    assert_eq!(restored.role(), Role::Admin);
    assert_eq!(
        restored.user().map(|user| user.email.as_str()),
        Some(ADMIN_EMAIL)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bad_credentials_and_stale_tokens_fall_back_to_guest() {
    let backend = start_backend().await;
    let tokens = Arc::new(InMemoryTokenStore::with_token("not-a-jwt"));

    let err = Session::login(&backend.api, tokens.clone(), ADMIN_EMAIL, "wrong password")
        .await
        .expect_err("login rejected");
    assert!(err.is_unauthorized());

    let session = Session::restore(&backend.api, tokens.clone()).await;
    assert_eq!(session.role(), Role::Guest);
    assert!(tokens.load().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_fetches_the_seeded_snapshot() {
    let backend = start_backend().await;
    let mut store = ContentStore::new(
        backend.api.clone(),
        Session::guest(Arc::new(InMemoryTokenStore::new())),
    );

    assert_eq!(store.load().await, Outcome::Applied);

    let state = store.state();
    assert!(!state.specifications.is_empty());
    assert!(!state.about.achievements.is_empty());
    assert!(state.blogs.iter().all(|blog| !blog.id.is_empty()));
    assert_eq!(backend.api.content().await.expect("snapshot"), *state);

    let slug = state.blogs.first().map(|blog| blog.slug.clone()).expect("seeded blog");
    let by_slug = backend.api.blog_by_slug(&slug).await.expect("blog by slug");
    assert_eq!(by_slug.slug, slug);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_helpers_splice_results_into_the_snapshot() {
    let backend = start_backend().await;
    let (mut store, _tokens) = admin_store(&backend.api).await;
    assert_eq!(store.load().await, Outcome::Applied);
    let team_before = store.state().team.len();

    let draft = TeamMember {
        name: "Dr. Ada".to_owned(),
        role: "CMO".to_owned(),
        ..TeamMember::default()
    };
    assert_eq!(store.create(&draft).await, Outcome::Applied);
    let created = store.state().team.last().cloned().expect("appended");
    assert_eq!(store.state().team.len(), team_before + 1);
    assert!(!created.id.is_empty());

    assert_eq!(
        store
            .update::<TeamMember>(&created.id, &json!({"role": "Chief Medical Officer"}))
            .await,
        Outcome::Applied
    );
    assert_eq!(
        store.state().team.last().map(|member| member.role.as_str()),
        Some("Chief Medical Officer")
    );

    assert_eq!(store.delete::<TeamMember>(&created.id).await, Outcome::Applied);
    assert_eq!(store.state().team.len(), team_before);

    let snapshot = store.state().clone();
    assert_eq!(
        store.delete::<TeamMember>(&created.id).await,
        Outcome::Failed
    );
    assert_eq!(store.state(), &snapshot);

    let patch = AboutPatch {
        heading: Some("About Healthspire".to_owned()),
        ..AboutPatch::default()
    };
    assert_eq!(store.update_about(&patch).await, Outcome::Applied);
    assert_eq!(store.state().about.heading, "About Healthspire");
    assert!(!store.state().about.achievements.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_slugs_fail_without_touching_state() {
    let backend = start_backend().await;
    let (mut store, _tokens) = admin_store(&backend.api).await;
    assert_eq!(store.load().await, Outcome::Applied);
    let existing = store.state().blogs.first().cloned().expect("seeded blog");
    let before = store.state().clone();

    let clash = Blog {
        title: "Clash".to_owned(),
        slug: existing.slug,
        ..Blog::default()
    };

    assert_eq!(store.create(&clash).await, Outcome::Failed);
    assert_eq!(store.state(), &before);
    assert!(store.last_error().is_some_and(|message| message.contains("conflict")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploads_serve_the_same_bytes() {
    let backend = start_backend().await;
    let (mut store, _tokens) = admin_store(&backend.api).await;
    let bytes = b"\x89PNG\r\n\x1a\nclient upload".to_vec();

    let url = store
        .upload_image("avatar.png", bytes.clone())
        .await
        .expect("upload succeeds");
    let fetched = reqwest::get(backend.api.resolve(&url).expect("absolute url"))
        .await
        .expect("fetch")
        .bytes()
        .await
        .expect("body");

    assert_eq!(fetched.as_ref(), bytes.as_slice());

    store
        .session_mut()
        .update_avatar(&backend.api, &url)
        .await
        .expect("avatar saved");
    assert_eq!(
        store.session().user().map(|user| user.avatar.as_str()),
        Some(url.as_str())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_dashboard_is_read_only() {
    let backend = start_backend().await;
    let session = Session::demo(Arc::new(InMemoryTokenStore::new()));
    assert_eq!(View::resolve("/admin", session.capability()), View::AdminDashboard);

    let mut store = ContentStore::new(backend.api.clone(), session);
    assert_eq!(store.load().await, Outcome::Applied);
    let mut dashboard = Dashboard::open(store.session().capability()).expect("demo may open");
    dashboard.team.draft.name = "Nobody".to_owned();

    assert_eq!(dashboard.team.submit_draft(&mut store).await, Outcome::Skipped);
    assert_eq!(dashboard.reset_to_defaults(&mut store).await, Outcome::Skipped);
    assert!(matches!(
        store.upload_image("x.png", vec![0]).await,
        Err(ClientError::NotPermitted)
    ));

    let view = DashboardView::of(&store);
    assert!(view.read_only_banner);
    assert!(!view.controls.add);
    assert_eq!(view.overview.solutions, store.state().specifications.len());
    assert_eq!(dashboard.team.draft.name, "Nobody");
    assert_eq!(store.session().capability(), Capability::ReadOnlyDashboard);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settings_reset_restores_defaults() {
    let backend = start_backend().await;
    let (mut store, _tokens) = admin_store(&backend.api).await;
    assert_eq!(store.load().await, Outcome::Applied);
    let defaults = store.state().specifications.len();
    let mut dashboard = Dashboard::open(store.session().capability()).expect("admin may open");

    for spec in store.state().specifications.clone() {
        assert_eq!(
            dashboard.solutions.delete_row(&mut store, &spec.id).await,
            Outcome::Applied
        );
    }
    assert!(store.state().specifications.is_empty());

    assert_eq!(dashboard.reset_to_defaults(&mut store).await, Outcome::Applied);
    assert_eq!(store.state().specifications.len(), defaults);
}
