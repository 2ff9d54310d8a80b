//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use marketdeck_core::Role;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::middleware::auth::set_current_user;
use crate::models::{CurrentUser, UserView};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    pub email: String,
    pub password: String,
}

/// Logout confirmation.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Login with role, email, and password.
///
/// On success the user identity is stored in the session and the user view
/// is returned.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserView>> {
    let user = AuthService::new(state.store()).login(
        request.role,
        &request.email,
        &request.password,
    )?;

    set_current_user(&session, &CurrentUser::from(&user)).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");

    Ok(Json(UserView::from(&user)))
}

/// Log out, discarding the session along with its cart.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>> {
    session.flush().await?;

    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out",
    }))
}

/// The currently logged-in user.
#[instrument(skip(state, user))]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<UserView>> {
    let user = state.store().users().get(user.id)?;
    Ok(Json(UserView::from(&user)))
}
