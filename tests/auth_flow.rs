//! Integration tests for the credential exchange and session lifecycle.
//!
//! These drive `AuthService` and `AuthContext` against a wiremock API:
//! 1. Login stores the token and cached profile; rejection propagates the
//!    server message verbatim and leaves the session empty.
//! 2. `is_authenticated()` holds only strictly between login and logout.
//! 3. Startup validation restores a good session and clears a rejected one.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use console::auth::context::{AuthContext, AuthState};
use console::auth::AuthService;
use console::errors::ApiError;
use console::models::user::{AuthUser, LoginCredentials};
use console::session::SessionStore;

fn session_store() -> (tempfile::TempDir, Arc<SessionStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SessionStore::open(dir.path().join("session.json")).unwrap());
    (dir, store)
}

fn admin_profile() -> serde_json::Value {
    json!({ "id": 1, "username": "admin", "email": "a@x.com", "is_active": true })
}

fn admin_user() -> AuthUser {
    AuthUser {
        id: 1,
        username: "admin".into(),
        email: "a@x.com".into(),
        is_active: true,
    }
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials {
        username: "admin".into(),
        password: password.into(),
    }
}

async fn mount_login_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "token_type": "bearer"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(admin_profile()))
        .mount(server)
        .await;
}

mod auth_service_tests {
    use super::*;

    #[tokio::test]
    async fn login_stores_token_then_fetches_and_caches_profile() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;

        let (_dir, store) = session_store();
        let auth = AuthService::new(server.uri(), Arc::clone(&store));

        let user = auth.login(&credentials("secret")).await.unwrap();
        assert_eq!(user, admin_user());

        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.user(), Some(admin_user()));
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn login_submits_credentials_form_encoded_not_json() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;

        let (_dir, store) = session_store();
        let auth = AuthService::new(server.uri(), store);
        auth.login(&credentials("s3cr3t")).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let login = requests
            .iter()
            .find(|r| r.url.path() == "/auth/login")
            .unwrap();

        let content_type = login.headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("application/x-www-form-urlencoded"));

        let body = String::from_utf8(login.body.clone()).unwrap();
        assert!(body.contains("username=admin"));
        assert!(body.contains("password=s3cr3t"));
    }

    #[tokio::test]
    async fn rejected_login_propagates_server_detail_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let (_dir, store) = session_store();
        let auth = AuthService::new(server.uri(), Arc::clone(&store));

        let err = auth.login(&credentials("wrong")).await.unwrap_err();
        match err {
            ApiError::Login(message) => assert_eq!(message, "Invalid credentials"),
            other => panic!("expected Login error, got {other:?}"),
        }

        // session store remains empty after a rejected exchange
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn get_me_without_token_fails_with_no_session() {
        let server = MockServer::start().await;
        let (_dir, store) = session_store();
        let auth = AuthService::new(server.uri(), store);

        let err = auth.get_me().await.unwrap_err();
        assert!(matches!(err, ApiError::NoSession));
        // and nothing hit the server
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_me_with_rejected_token_fails_with_session_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Could not validate credentials" })))
            .mount(&server)
            .await;

        let (_dir, store) = session_store();
        store.set_token("stale-tok").unwrap();
        let auth = AuthService::new(server.uri(), store);

        let err = auth.get_me().await.unwrap_err();
        match err {
            ApiError::SessionRejected(status) => assert_eq!(status.as_u16(), 401),
            other => panic!("expected SessionRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn is_authenticated_holds_only_between_login_and_logout() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;

        let (_dir, store) = session_store();
        let auth = AuthService::new(server.uri(), store);

        assert!(!auth.is_authenticated());
        auth.login(&credentials("secret")).await.unwrap();
        assert!(auth.is_authenticated());
        auth.logout();
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn logout_twice_equals_logout_once() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;

        let (_dir, store) = session_store();
        let auth = AuthService::new(server.uri(), Arc::clone(&store));
        auth.login(&credentials("secret")).await.unwrap();

        auth.logout();
        auth.logout();

        assert!(!auth.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }
}

mod auth_context_tests {
    use super::*;

    #[tokio::test]
    async fn starts_initializing_and_resolves_anonymous_without_token() {
        let server = MockServer::start().await;
        let (_dir, store) = session_store();
        let ctx = AuthContext::new(AuthService::new(server.uri(), store));

        assert_eq!(ctx.current(), AuthState::Initializing);
        ctx.initialize().await;
        assert_eq!(ctx.current(), AuthState::Anonymous);
        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_restores_a_valid_stored_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(admin_profile()))
            .mount(&server)
            .await;

        let (_dir, store) = session_store();
        store.set_token("tok-1").unwrap();
        let ctx = AuthContext::new(AuthService::new(server.uri(), store));

        ctx.initialize().await;
        assert_eq!(ctx.current(), AuthState::Authenticated(admin_user()));
        assert_eq!(ctx.user(), Some(admin_user()));
    }

    #[tokio::test]
    async fn initialize_clears_a_rejected_session_and_recovers_locally() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "expired" })))
            .mount(&server)
            .await;

        let (_dir, store) = session_store();
        store.set_token("expired-tok").unwrap();
        let ctx = AuthContext::new(AuthService::new(server.uri(), Arc::clone(&store)));

        // no error surfaces; the session is cleared instead
        ctx.initialize().await;
        assert_eq!(ctx.current(), AuthState::Anonymous);
        assert!(store.token().is_none());
    }

    #[tokio::test]
    async fn login_transitions_to_authenticated_with_the_exact_profile() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;

        let (_dir, store) = session_store();
        let ctx = AuthContext::new(AuthService::new(server.uri(), store));
        ctx.initialize().await;

        let user = ctx.login(&credentials("secret")).await.unwrap();
        assert_eq!(user, admin_user());
        assert_eq!(ctx.current(), AuthState::Authenticated(admin_user()));
    }

    #[tokio::test]
    async fn failed_login_leaves_state_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let (_dir, store) = session_store();
        let ctx = AuthContext::new(AuthService::new(server.uri(), store));
        ctx.initialize().await;

        assert!(ctx.login(&credentials("wrong")).await.is_err());
        assert_eq!(ctx.current(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn subscribers_observe_login_and_logout_transitions() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;

        let (_dir, store) = session_store();
        let ctx = AuthContext::new(AuthService::new(server.uri(), store));
        let mut rx = ctx.subscribe();

        ctx.initialize().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), AuthState::Anonymous);

        ctx.login(&credentials("secret")).await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthState::Authenticated(admin_user()));

        ctx.logout();
        assert_eq!(*rx.borrow_and_update(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn context_logout_is_idempotent() {
        let server = MockServer::start().await;
        let (_dir, store) = session_store();
        let ctx = AuthContext::new(AuthService::new(server.uri(), store));
        ctx.initialize().await;

        ctx.logout();
        ctx.logout();
        assert_eq!(ctx.current(), AuthState::Anonymous);
    }
}
