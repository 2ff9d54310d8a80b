//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/health                      - Health check
//! GET    /api/test                        - Connectivity test
//!
//! # Auth
//! POST   /api/auth/login                  - Login (rate limited in production)
//! POST   /api/auth/logout                 - Logout (discards the cart)
//! GET    /api/auth/me                     - Current user
//!
//! # Products
//! GET    /api/products?search=&category=  - Filtered catalog
//! POST   /api/products                    - List a product (supplier)
//! PUT    /api/products/{id}               - Update a product (owner/admin)
//! DELETE /api/products/{id}               - Delete a product (owner/admin)
//!
//! # Cart (customer)
//! GET    /api/cart                        - Priced cart
//! POST   /api/cart/items                  - Add/merge a line
//! PATCH  /api/cart/items/{product_id}     - Set quantity (<= 0 removes)
//! DELETE /api/cart/items/{product_id}     - Remove a line
//! GET    /api/cart/count                  - Item count badge
//! POST   /api/checkout                    - Check out the cart
//!
//! # Orders
//! GET    /api/orders                      - Role-scoped order list
//! PATCH  /api/orders/{id}/status          - Status transition (agent/admin)
//!
//! # Dashboard
//! GET    /api/dashboard                   - Role-specific dashboard
//!
//! Any other path returns the 404 JSON envelope.
//! ```

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::ErrorBody;
use crate::middleware::{create_session_layer, rate_limit};
use crate::state::AppState;

/// Create the auth routes router.
///
/// The login route is rate limited outside development; in-process test
/// drivers have no peer address for the limiter to key on.
pub fn auth_routes(config: &AppConfig) -> Router<AppState> {
    let mut login = Router::new().route("/login", post(auth::login));
    if !config.environment.is_development() {
        login = login.route_layer(rate_limit::login_rate_limiter());
    }

    login
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            axum::routing::put(products::update).delete(products::delete),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{product_id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/count", get(cart::count))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}/status", patch(orders::update_status))
}

/// Create all `/api` routes.
pub fn api_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/test", get(health::test))
        .nest("/auth", auth_routes(config))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/orders", order_routes())
        .route("/dashboard", get(dashboard::show))
}

/// Assemble the application: routes, sessions, CORS, tracing, and the 404
/// fallback.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let cors = cors_layer(state.config());

    Router::new()
        .nest("/api", api_routes(state.config()))
        .fallback(not_found)
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 404 fallback with the JSON envelope.
async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("API endpoint not found".to_string())),
    )
}

/// CORS for the configured frontend origin, with credentials for the
/// session cookie.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = config
        .cors_origin()
        .parse::<HeaderValue>()
        .expect("origin of a parsed URL is a valid header value");

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
