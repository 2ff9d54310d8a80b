//! Diagnostic route handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use crate::config::Environment;
use crate::state::AppState;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// Connectivity test response body.
#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: &'static str,
    pub environment: Environment,
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Marketdeck API is running",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Connectivity test, reporting the running environment.
pub async fn test(State(state): State<AppState>) -> Json<TestResponse> {
    Json(TestResponse {
        success: true,
        message: "Backend API is working",
        environment: state.config().environment,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_shape() {
        let Json(body) = health().await;
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], "OK");
        assert!(json["message"].is_string());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_test_response_shape() {
        let body = TestResponse {
            success: true,
            message: "Backend API is working",
            environment: Environment::Development,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["environment"], "development");
    }
}
