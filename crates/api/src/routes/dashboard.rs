//! Dashboard route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::dashboard::{self, DashboardView};
use crate::state::AppState;

/// The role-specific dashboard for the requesting user.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<DashboardView>> {
    let user = state.store().users().get(user.id)?;
    Ok(Json(dashboard::for_user(state.store(), &user)))
}
