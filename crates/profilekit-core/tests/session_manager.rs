//! End-to-end tests for the session manager against a stub backend.
//!
//! Each test stands up a minimal backend on an ephemeral port and drives the
//! real `SessionManager` + `ApiClient` over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use profilekit_core::{ApiClient, AuthStatus, ProfilePatch, SessionManager};

/// Serialized user fixture matching the backend's wire shape.
fn ada(display_name: &str) -> Value {
    json!({
        "id": 42,
        "email": "ada@example.com",
        "displayName": display_name,
        "avatarUrl": "",
        "bio": "x",
        "createdAt": "2024-01-15T10:30:00",
        "updatedAt": "2024-02-01T08:00:00"
    })
}

async fn spawn_backend(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub backend died");
    });
    addr
}

fn json_route(resp: Value) -> axum::routing::MethodRouter {
    post(move || {
        let resp = resp.clone();
        async move { Json(resp) }
    })
}

fn user_route(resp: Value) -> axum::routing::MethodRouter {
    get(move || {
        let resp = resp.clone();
        async move { Json(resp) }
    })
}

async fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(format!("http://{}", addr)).expect("Failed to build client")
}

/// Address with nothing listening on it, for transport-failure scenarios.
async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    addr
}

#[tokio::test]
async fn initial_load_with_expired_session_stays_anonymous() {
    let app = Router::new().route("/api/user", user_route(json!({"authenticated": false})));
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;

    let session = manager.session().await;
    assert!(session.user.is_none());
    assert!(!session.loading);
    assert!(session.error.is_none());
    assert_eq!(session.status(), AuthStatus::Anonymous);
}

#[tokio::test]
async fn initial_load_with_live_session_sets_user() {
    let app = Router::new().route(
        "/api/user",
        user_route(json!({"authenticated": true, "user": ada("Ada")})),
    );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;

    let session = manager.session().await;
    assert_eq!(session.status(), AuthStatus::Authenticated);
    let user = session.user.expect("Expected a user");
    assert_eq!(user.id, 42);
    assert_eq!(user.display_name.as_deref(), Some("Ada"));
    assert!(!session.loading);
}

#[tokio::test]
async fn failed_auth_check_is_silent_and_clears_loading() {
    let app = Router::new().route(
        "/api/user",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;

    let session = manager.session().await;
    assert!(session.user.is_none());
    assert!(!session.loading);
    // An unauthenticated visitor is not an error condition
    assert!(session.error.is_none());
}

#[tokio::test]
async fn login_builds_redirect_url_without_touching_state() {
    let app = Router::new().route("/api/user", user_route(json!({"authenticated": false})));
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;
    let before = manager.session().await;

    let url = manager.login("github");
    assert_eq!(url, format!("http://{}/oauth2/authorization/github", addr));

    let after = manager.session().await;
    assert_eq!(before.user.is_none(), after.user.is_none());
    assert!(after.error.is_none());
}

#[tokio::test]
async fn successful_update_replaces_user() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Old Name")})),
        )
        .route(
            "/api/profile",
            json_route(json!({"success": true, "user": ada("Ada")})),
        );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;
    let patch = ProfilePatch {
        display_name: "Ada".to_string(),
        bio: "x".to_string(),
    };

    let updated = manager
        .update_profile(&patch)
        .await
        .expect("Update should succeed");
    assert_eq!(updated.display_name.as_deref(), Some("Ada"));

    let session = manager.session().await;
    assert_eq!(
        session.user.expect("Expected a user").display_name.as_deref(),
        Some("Ada")
    );
    assert!(session.error.is_none());
}

#[tokio::test]
async fn rejected_update_surfaces_server_message_and_keeps_user() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Ada")})),
        )
        .route(
            "/api/profile",
            json_route(json!({"success": false, "error": "User not authenticated"})),
        );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;
    let patch = ProfilePatch {
        display_name: "Countess".to_string(),
        bio: String::new(),
    };

    let err = manager
        .update_profile(&patch)
        .await
        .expect_err("Update should be rejected");
    assert_eq!(err.message, "User not authenticated");

    let session = manager.session().await;
    assert_eq!(session.error.as_deref(), Some("User not authenticated"));
    // Previous user value survives the failure
    assert_eq!(
        session.user.expect("Expected a user").display_name.as_deref(),
        Some("Ada")
    );
}

#[tokio::test]
async fn rejected_update_without_message_uses_fixed_fallback() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Ada")})),
        )
        .route("/api/profile", json_route(json!({"success": false})));
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;
    let patch = ProfilePatch {
        display_name: "Ada".to_string(),
        bio: String::new(),
    };

    let err = manager
        .update_profile(&patch)
        .await
        .expect_err("Update should be rejected");
    assert_eq!(err.message, "Profile update failed");
    assert_eq!(
        manager.error().await.as_deref(),
        Some("Profile update failed")
    );
}

#[tokio::test]
async fn transport_failure_on_update_surfaces_exception_message() {
    let app = Router::new().route(
        "/api/user",
        user_route(json!({"authenticated": true, "user": ada("Ada")})),
    );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;

    // Point a second manager at a dead port so only the update fails
    let dead = dead_addr().await;
    let broken = SessionManager::new(client_for(dead).await);
    let patch = ProfilePatch {
        display_name: "Ada".to_string(),
        bio: String::new(),
    };

    let err = broken
        .update_profile(&patch)
        .await
        .expect_err("Update should fail");
    assert!(!err.message.is_empty());
    assert_ne!(err.message, "Profile update failed");
    assert_eq!(broken.error().await.as_deref(), Some(err.message.as_str()));
    assert!(broken.user().await.is_none());

    // The healthy manager is untouched
    assert!(manager.user().await.is_some());
}

#[tokio::test]
async fn logout_success_clears_user() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Ada")})),
        )
        .route(
            "/api/logout",
            json_route(json!({"success": true, "message": "Logged out successfully"})),
        );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;
    assert!(manager.user().await.is_some());

    manager.logout().await.expect("Logout should succeed");

    let session = manager.session().await;
    assert!(session.user.is_none());
    assert!(session.error.is_none());
    assert_eq!(session.status(), AuthStatus::Anonymous);
}

#[tokio::test]
async fn logout_failure_keeps_user_and_sets_fixed_message() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Ada")})),
        )
        .route(
            "/api/logout",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;

    let result = manager.logout().await;
    assert!(result.is_err());

    let session = manager.session().await;
    assert_eq!(
        session.error.as_deref(),
        Some("Logout failed. Please try again.")
    );
    // Stale-but-visible session is preserved
    assert_eq!(
        session.user.expect("Expected a user").display_name.as_deref(),
        Some("Ada")
    );
}

#[tokio::test]
async fn clear_error_is_idempotent() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Ada")})),
        )
        .route(
            "/api/logout",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await).await;
    let _ = manager.logout().await;
    assert!(manager.error().await.is_some());

    manager.clear_error().await;
    assert!(manager.error().await.is_none());

    // Clearing again is a no-op
    manager.clear_error().await;
    assert!(manager.error().await.is_none());
}

#[tokio::test]
async fn error_auto_dismisses_after_ttl() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Ada")})),
        )
        .route(
            "/api/logout",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await)
        .await
        .with_error_ttl(Duration::from_millis(100));

    let _ = manager.logout().await;
    assert!(manager.error().await.is_some());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(manager.error().await.is_none());
}

#[tokio::test]
async fn error_change_restarts_dismissal_clock() {
    let app = Router::new()
        .route(
            "/api/user",
            user_route(json!({"authenticated": true, "user": ada("Ada")})),
        )
        .route(
            "/api/profile",
            json_route(json!({"success": false, "error": "still broken"})),
        )
        .route(
            "/api/logout",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let addr = spawn_backend(app).await;

    let manager = SessionManager::connect(client_for(addr).await)
        .await
        .with_error_ttl(Duration::from_millis(500));

    let _ = manager.logout().await;
    assert!(manager.error().await.is_some());

    // Replace the error partway through the first TTL
    tokio::time::sleep(Duration::from_millis(300)).await;
    let patch = ProfilePatch {
        display_name: "Ada".to_string(),
        bio: String::new(),
    };
    let _ = manager.update_profile(&patch).await;
    assert_eq!(manager.error().await.as_deref(), Some("still broken"));

    // Past the first error's deadline, the second one must still be visible
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(manager.error().await.as_deref(), Some("still broken"));

    // And it expires on its own clock
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(manager.error().await.is_none());
}
