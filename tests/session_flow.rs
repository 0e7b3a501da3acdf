mod common;

use common::{MockApi, PASSWORD, TOKEN};
use ticketing_client::handlers;
use ticketing_client::http::ApiClient;
use ticketing_client::pages::{LoginMode, Navbar};
use ticketing_client::services::AuthService;
use ticketing_client::session::Session;
use ticketing_client::storage::{FileTokenStore, MemoryTokenStore, TokenStore};
use ticketing_client::{App, ClientError};

#[tokio::test]
async fn test_login_persists_token_and_greets_user() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::new()).unwrap();
    app.session().load().await;

    let user = app.session().login("a@b.com", PASSWORD).await.unwrap();

    assert_eq!(user.email, "a@b.com");
    assert_eq!(app.session().session().token().as_deref(), Some(TOKEN));
    assert!(app.session().is_authenticated());
    assert!(Navbar::render(&app.session().snapshot()).contains("Hi, a@b.com"));
}

#[tokio::test]
async fn test_logout_removes_token() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::new()).unwrap();
    app.session().login("a@b.com", PASSWORD).await.unwrap();
    let hits_before = api.hit_count();

    app.session().logout().unwrap();

    assert!(!app.session().is_authenticated());
    assert_eq!(app.session().session().token(), None);
    assert_eq!(api.hit_count(), hits_before);
}

#[tokio::test]
async fn test_failed_login_surfaces_api_message_and_stays_logged_out() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::new()).unwrap();
    app.session().load().await;

    let err = app.session().login("a@b.com", "wrong").await.unwrap_err();

    assert!(matches!(err, ClientError::Authentication(ref m) if m == "invalid credentials"));
    assert!(!app.session().is_authenticated());
    assert_eq!(app.session().session().token(), None);
}

#[tokio::test]
async fn test_mistyped_password_keeps_existing_session() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::with_token(TOKEN)).unwrap();
    handlers::mount(&app).await;
    assert!(app.session().is_authenticated());

    let rendered = handlers::login(&app, "a@b.com", "typo", LoginMode::SignIn).await;

    assert!(!rendered.success);
    assert!(rendered.body.contains("invalid credentials"));
    assert!(!rendered.body.contains("Your session has expired"));
    let snapshot = app.session().snapshot();
    assert!(!snapshot.expired);
    assert!(snapshot.is_authenticated());
    assert_eq!(app.session().session().token().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_current_user_without_token_makes_no_request() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::new()).unwrap();

    let snapshot = app.session().load().await;

    assert!(!snapshot.is_authenticated());
    assert!(!snapshot.is_loading);
    assert!(!snapshot.expired);
    assert_eq!(api.hit_count(), 0);
}

#[tokio::test]
async fn test_stored_token_rehydrates_user() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::with_token(TOKEN)).unwrap();
    assert!(app.session().is_loading());

    let snapshot = app.session().load().await;

    assert_eq!(snapshot.user.map(|u| u.email), Some("a@b.com".to_string()));
    assert!(!app.session().is_loading());
    assert_eq!(api.hits(), vec!["GET /users/me"]);
}

#[tokio::test]
async fn test_rejected_token_on_load_logs_out() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::with_token("expired")).unwrap();

    let snapshot = handlers::mount(&app).await;

    assert!(!snapshot.is_authenticated());
    assert!(snapshot.expired);
    assert_eq!(app.session().session().token(), None);

    let rendered = handlers::whoami(&app);
    assert!(rendered.body.contains("[Login]"));
    assert!(rendered.body.contains("Your session has expired"));
}

#[tokio::test]
async fn test_get_current_user_distinguishes_expired_from_absent() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;

    let anonymous = auth_service(&base, MemoryTokenStore::new());
    assert_eq!(anonymous.get_current_user().await.unwrap(), None);

    let stale = auth_service(&base, MemoryTokenStore::with_token("nope"));
    assert!(matches!(
        stale.get_current_user().await,
        Err(ClientError::SessionExpired)
    ));
    assert!(!stale.is_authenticated());
}

fn auth_service(base: &str, store: MemoryTokenStore) -> AuthService {
    let api = ApiClient::new(base, Session::new(store)).unwrap();
    AuthService::new(api)
}

#[tokio::test]
async fn test_subscribers_see_login_and_logout() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::new()).unwrap();
    let mut updates = app.session().subscribe();

    app.session().login("a@b.com", PASSWORD).await.unwrap();
    updates.changed().await.unwrap();
    assert!(updates.borrow_and_update().is_authenticated());

    app.session().logout().unwrap();
    updates.changed().await.unwrap();
    assert!(!updates.borrow().is_authenticated());
}

#[tokio::test]
async fn test_register_signs_in() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::new()).unwrap();
    app.session().load().await;

    let rendered = handlers::login(&app, "new@b.com", "secret", LoginMode::Register).await;

    assert!(rendered.success);
    assert!(rendered.body.contains("Hi, new@b.com"));
    assert_eq!(app.session().session().token().as_deref(), Some(TOKEN));

    let rejected = handlers::login(&app, "taken@b.com", "secret", LoginMode::Register).await;
    assert!(!rejected.success);
    assert!(rejected.body.contains("email already registered"));
}

#[tokio::test]
async fn test_login_handler_renders_greeting() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::new()).unwrap();
    handlers::mount(&app).await;

    let rendered = handlers::login(&app, "a@b.com", PASSWORD, LoginMode::SignIn).await;

    assert!(rendered.success);
    assert!(rendered.body.contains("Hi, a@b.com"));
    assert!(rendered.body.contains("Continue at /events"));
}

#[tokio::test]
async fn test_file_store_keeps_session_between_runs() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = App::with_store(&base, FileTokenStore::new(&path, "auth_token")).unwrap();
    first.session().login("a@b.com", PASSWORD).await.unwrap();

    let second = App::with_store(&base, FileTokenStore::new(&path, "auth_token")).unwrap();
    let snapshot = second.session().load().await;
    assert!(snapshot.is_authenticated());

    second.session().logout().unwrap();
    assert_eq!(FileTokenStore::new(&path, "auth_token").load().unwrap(), None);
}

#[tokio::test]
async fn test_failed_logout_is_reported_and_keeps_session() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let app = App::with_store(&base, FileTokenStore::new(&path, "auth_token")).unwrap();
    app.session().login("a@b.com", PASSWORD).await.unwrap();
    std::fs::create_dir(path.with_extension("tmp")).unwrap();

    let rendered = handlers::logout(&app);

    assert!(!rendered.success);
    assert!(rendered.body.contains("Logout failed: Unable to access the saved session."));
    assert!(app.session().is_authenticated());

    let next_run = App::with_store(&base, FileTokenStore::new(&path, "auth_token")).unwrap();
    assert!(next_run.session().load().await.is_authenticated());
}

#[tokio::test]
async fn test_corrupt_session_file_can_be_recovered() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{garbage").unwrap();

    let app = App::with_store(&base, FileTokenStore::new(&path, "auth_token")).unwrap();
    assert!(!handlers::mount(&app).await.is_authenticated());
    assert!(handlers::logout(&app).success);

    let rendered = handlers::login(&app, "a@b.com", PASSWORD, LoginMode::SignIn).await;

    assert!(rendered.success);
    assert_eq!(
        FileTokenStore::new(&path, "auth_token").load().unwrap().as_deref(),
        Some(TOKEN)
    );
}

#[tokio::test]
async fn test_whoami_shows_role() {
    let api = MockApi::new();
    let base = common::spawn(api.clone()).await;
    let app = App::with_store(&base, MemoryTokenStore::with_token(TOKEN)).unwrap();
    handlers::mount(&app).await;

    let rendered = handlers::whoami(&app);

    assert!(rendered.body.contains("A <a@b.com> (user)"));
}
