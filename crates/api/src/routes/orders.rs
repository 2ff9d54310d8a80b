//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use marketdeck_core::{OrderId, OrderStatus, Role};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::OrderView;
use crate::services::orders;
use crate::state::AppState;

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// List the orders visible to the requesting role.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Json<Vec<OrderView>> {
    let visible = orders::visible_to(state.store(), &user);
    Json(orders::views(state.store(), &visible))
}

/// Move an order to a new status (assigned agent or admin).
#[instrument(skip(state, user))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
    Json(request): Json<StatusUpdate>,
) -> Result<Json<OrderView>> {
    let order = state.store().orders().get(id)?;

    let allowed = match user.role {
        Role::Admin => true,
        Role::DeliveryAgent => order.delivery_agent_id == Some(user.id),
        Role::Supplier | Role::Customer => false,
    };
    if !allowed {
        return Err(AppError::Forbidden(
            "Only the assigned delivery agent can update this order".to_string(),
        ));
    }

    let updated = state.store().orders().transition(id, request.status)?;
    tracing::info!(order_id = %id, status = %updated.status, "order status updated");

    let customer_name = state
        .store()
        .users()
        .get(updated.customer_id)
        .map_or_else(|_| "Unknown".to_string(), |u| u.name);
    Ok(Json(OrderView::new(&updated, customer_name)))
}
