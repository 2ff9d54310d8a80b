//! Authentication flow tests.

use axum::http::StatusCode;
use marketdeck_integration_tests::{TestApp, demo};

#[tokio::test]
async fn login_with_valid_triple_returns_user() {
    let mut app = TestApp::new();
    let body = app.login_as(demo::CUSTOMER1).await;

    assert_eq!(body["name"], "John Smith");
    assert_eq!(body["role"], "customer");
    assert_eq!(body["wallet_balance"], "1500.00");
    // No password material in the response.
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let mut app = TestApp::new();
    let (status, body) = app
        .login("customer", "customer1@marketdeck.dev", "wrong")
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_checks_the_role_namespace() {
    let mut app = TestApp::new();
    // Valid customer credentials, submitted under the supplier role.
    let (status, _) = app
        .login("supplier", "customer1@marketdeck.dev", "customer123")
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_malformed_email_is_a_bad_request() {
    let mut app = TestApp::new();
    let (status, _) = app.login("customer", "not-an-email", "whatever").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn me_requires_a_session() {
    let mut app = TestApp::new();
    let (status, body) = app.get("/api/auth/me").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");
}

#[tokio::test]
async fn me_returns_the_logged_in_user() {
    let mut app = TestApp::new();
    app.login_as(demo::AGENT1).await;

    let (status, body) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alex Rodriguez");
    assert_eq!(body["deliveries"], 145);
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    let (status, body) = app.post_empty("/api/auth/logout").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
