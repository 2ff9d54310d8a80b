//! HTTP middleware: sessions, authentication, and rate limiting.

pub mod auth;
pub mod rate_limit;
pub mod session;

pub use auth::RequireAuth;
pub use session::create_session_layer;
