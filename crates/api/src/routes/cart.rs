//! Cart and checkout route handlers.
//!
//! The cart lives in the session; every response returns the repriced cart
//! so the client never recomputes totals.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use marketdeck_core::{ProductId, Role};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Cart, CurrentUser, session::keys};
use crate::services::cart::{self, CartView, CheckoutError, CheckoutReceipt};
use crate::state::AppState;

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    /// Zero or negative removes the line.
    pub quantity: i64,
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Show the priced cart.
#[instrument(skip(state, user, session))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Json<CartView>> {
    ensure_customer(&user)?;
    let cart = load_cart(&session).await?;
    Ok(Json(cart::price_cart(state.store(), &cart)?))
}

/// Add a product to the cart, merging quantities.
///
/// Rejected when the product is out of stock.
#[instrument(skip(state, user, session))]
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    ensure_customer(&user)?;

    let product = state.store().products().get(request.product_id)?;
    let quantity = request.quantity.unwrap_or(1).max(1);
    if !product.in_stock() {
        return Err(CheckoutError::InsufficientStock {
            product_id: product.id,
            requested: quantity,
            available: 0,
        }
        .into());
    }

    let mut cart = load_cart(&session).await?;
    cart.add(product.id, quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(cart::price_cart(state.store(), &cart)?))
}

/// Set the quantity of a cart line; zero or negative removes it.
#[instrument(skip(state, user, session))]
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(product_id): Path<ProductId>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartView>> {
    ensure_customer(&user)?;
    let mut cart = load_cart(&session).await?;

    let found = if request.quantity <= 0 {
        cart.remove(product_id)
    } else {
        let quantity = u32::try_from(request.quantity)
            .map_err(|_| AppError::BadRequest("quantity out of range".to_string()))?;
        cart.set_quantity(product_id, quantity)
    };
    if !found {
        return Err(AppError::NotFound(format!(
            "product {product_id} is not in the cart"
        )));
    }

    save_cart(&session, &cart).await?;
    Ok(Json(cart::price_cart(state.store(), &cart)?))
}

/// Remove a cart line.
#[instrument(skip(state, user, session))]
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    ensure_customer(&user)?;
    let mut cart = load_cart(&session).await?;

    if !cart.remove(product_id) {
        return Err(AppError::NotFound(format!(
            "product {product_id} is not in the cart"
        )));
    }

    save_cart(&session, &cart).await?;
    Ok(Json(cart::price_cart(state.store(), &cart)?))
}

/// Cart badge count.
#[instrument(skip(user, session))]
pub async fn count(RequireAuth(user): RequireAuth, session: Session) -> Result<Json<CartCount>> {
    ensure_customer(&user)?;
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.item_count(),
    }))
}

/// Check out the cart.
///
/// On success the wallet is debited, the order is recorded, and the cart is
/// cleared from the session.
#[instrument(skip(state, user, session))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Json<CheckoutReceipt>> {
    ensure_customer(&user)?;
    let cart = load_cart(&session).await?;

    let receipt = cart::checkout(state.store(), user.id, &cart)?;
    let _: Option<Cart> = session.remove(keys::CART).await?;

    tracing::info!(
        order_id = %receipt.order.id,
        total = %receipt.order.total,
        "checkout complete"
    );
    Ok(Json(receipt))
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, or an empty one.
async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Store the cart in the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

fn ensure_customer(user: &CurrentUser) -> Result<()> {
    if user.role == Role::Customer {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only customers have a cart".to_string(),
        ))
    }
}
