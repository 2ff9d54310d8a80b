//! Integration tests for Marketdeck.
//!
//! The store is in-memory, so there is no external server to stand up:
//! every test builds the full router (sessions, CORS, fallback included)
//! and drives it in process. [`TestApp`] carries the session cookie between
//! requests like a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketdeck-integration-tests
//! ```
//!
//! Each `TestApp` seeds its own dataset; tests never share state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use marketdeck_api::config::{AppConfig, Environment};
use marketdeck_api::routes;
use marketdeck_api::state::AppState;

/// An in-process API instance with a cookie jar of one.
pub struct TestApp {
    router: Router,
    cookie: Option<HeaderValue>,
}

impl TestApp {
    /// Build an app over a freshly seeded demo dataset.
    ///
    /// # Panics
    ///
    /// Panics if the embedded fixture fails to load.
    #[must_use]
    pub fn new() -> Self {
        let config = AppConfig {
            host: std::net::Ipv4Addr::LOCALHOST.into(),
            port: 0,
            frontend_url: "http://localhost:3000"
                .parse()
                .expect("static URL parses"),
            environment: Environment::Development,
            seed_path: None,
            sentry_dsn: None,
        };
        let state = AppState::new(config).expect("demo dataset loads");

        Self {
            router: routes::app(state),
            cookie: None,
        }
    }

    /// Issue a request, carrying the session cookie.
    ///
    /// Returns the status and the parsed JSON body (`Value::Null` for empty
    /// bodies).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        // Adopt the latest session cookie, as a browser would.
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .expect("cookie is ascii")
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string();
            self.cookie = Some(HeaderValue::from_str(&pair).expect("cookie pair is valid"));
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };

        (status, json)
    }

    /// GET a path.
    pub async fn get(&mut self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None).await
    }

    /// POST a JSON body.
    pub async fn post(&mut self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body)).await
    }

    /// POST with no body.
    pub async fn post_empty(&mut self, path: &str) -> (StatusCode, Value) {
        self.request(Method::POST, path, None).await
    }

    /// PATCH a JSON body.
    pub async fn patch(&mut self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// PUT a JSON body.
    pub async fn put(&mut self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE a path.
    pub async fn delete(&mut self, path: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, None).await
    }

    /// Attempt a login.
    pub async fn login(&mut self, role: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/api/auth/login",
            json!({"role": role, "email": email, "password": password}),
        )
        .await
    }

    /// Login that must succeed.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login_ok(&mut self, role: &str, email: &str, password: &str) -> Value {
        let (status, body) = self.login(role, email, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body
    }

    /// Login with a [`demo`] credential triple; must succeed.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login_as(&mut self, (role, email, password): (&str, &str, &str)) -> Value {
        self.login_ok(role, email, password).await
    }

    /// Drop the session cookie without logging out.
    pub fn forget_cookie(&mut self) {
        self.cookie = None;
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Seeded demo credentials used across tests.
pub mod demo {
    pub const ADMIN: (&str, &str, &str) = ("admin", "admin@marketdeck.dev", "admin123");
    pub const SUPPLIER1: (&str, &str, &str) =
        ("supplier", "supplier1@marketdeck.dev", "supplier123");
    pub const SUPPLIER2: (&str, &str, &str) =
        ("supplier", "supplier2@marketdeck.dev", "supplier123");
    pub const CUSTOMER1: (&str, &str, &str) =
        ("customer", "customer1@marketdeck.dev", "customer123");
    pub const AGENT1: (&str, &str, &str) =
        ("delivery_agent", "agent1@marketdeck.dev", "agent123");
    pub const AGENT2: (&str, &str, &str) =
        ("delivery_agent", "agent2@marketdeck.dev", "agent123");
}
