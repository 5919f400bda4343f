mod test_utils;

use std::sync::{atomic::Ordering, Arc};

use portfolio_frontend::{
    api_errors::ApiError,
    entities::{blog_post::BlogPost, user::User},
    session::{InMemorySession, SessionContext},
};
use serde_json::Value;
use test_utils::{BackendState, MockBackend};

fn signed_in() -> Arc<InMemorySession> {
    Arc::new(InMemorySession::with_user(User {
        id: 1,
        email: "owner@example.com".into(),
        username: None,
        is_admin: true,
        mfa_enabled: false,
    }))
}

#[actix_rt::test]
async fn decodes_successful_json() {
    let backend = MockBackend::spawn().await;
    let client = backend.client(Arc::new(InMemorySession::new()));

    let post: BlogPost = client.get("/blogs/hello-world").await.unwrap();
    assert_eq!(post.slug, "hello-world");
    assert_eq!(post.reading_time, "2 min read");
}

#[actix_rt::test]
async fn surfaces_backend_detail_message() {
    let backend = MockBackend::spawn().await;
    let client = backend.client(Arc::new(InMemorySession::new()));

    let err = client.get::<BlogPost>("/blogs/missing").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Backend {
            status: 404,
            message: "Blog post not found".into()
        }
    );
}

#[actix_rt::test]
async fn falls_back_to_status_text() {
    let backend = MockBackend::spawn().await;
    let client = backend.client(Arc::new(InMemorySession::new()));

    let err = client.get::<Value>("/teapot").await.unwrap_err();
    assert_eq!(err.status(), Some(418));
    assert_eq!(err.message(), "I'm a teapot");
}

#[actix_rt::test]
async fn refreshes_once_then_retries() {
    let backend = MockBackend::spawn().await;
    let client = backend.client(signed_in());

    let body: Value = client.get("/protected").await.unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(backend.state.refreshes(), 1);
    assert_eq!(backend.state.hits(), 2);

    // The refreshed cookie sticks for later calls.
    let _: Value = client.get("/protected").await.unwrap();
    assert_eq!(backend.state.refreshes(), 1);
    assert_eq!(backend.state.hits(), 3);
}

#[actix_rt::test]
async fn concurrent_401s_share_a_single_refresh() {
    let backend = MockBackend::spawn().await;
    let client = Arc::new(backend.client(signed_in()));

    let calls = (0..6).map(|_| {
        let client = client.clone();
        async move { client.get::<Value>("/protected").await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()), "{:?}", results);
    assert_eq!(backend.state.refreshes(), 1);
}

#[actix_rt::test]
async fn second_401_is_an_error_not_another_retry() {
    let backend = MockBackend::spawn().await;
    backend.state.always_unauthorized.store(true, Ordering::SeqCst);
    let session = signed_in();
    let client = backend.client(session.clone());

    let err = client.get::<Value>("/protected").await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized("Token expired".into()));
    assert_eq!(backend.state.refreshes(), 1);
    assert_eq!(backend.state.hits(), 2);
    // The refresh itself worked, so the user stays signed in.
    assert!(session.is_authenticated());
}

#[actix_rt::test]
async fn failed_refresh_clears_the_session() {
    let backend = MockBackend::spawn_with(BackendState::default()).await;
    backend.state.refresh_succeeds.store(false, Ordering::SeqCst);
    let session = signed_in();
    let client = backend.client(session.clone());

    let err = client.get::<Value>("/protected").await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized("Refresh token expired".into()));
    assert_eq!(backend.state.hits(), 1);
    assert!(!session.is_authenticated());
}

#[actix_rt::test]
async fn login_401_does_not_trigger_refresh() {
    let backend = MockBackend::spawn().await;
    let client = backend.client(Arc::new(InMemorySession::new()));

    let err = client
        .post::<_, Value>("/auth/login", &serde_json::json!({ "email": "a@b.co", "password": "x" }))
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Unauthorized("Invalid credentials".into()));
    assert_eq!(backend.state.refreshes(), 0);
}
