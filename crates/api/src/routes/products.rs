//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use marketdeck_core::{Money, ProductId, Role};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Product, product::DEFAULT_RATING};
use crate::state::AppState;
use crate::store::Store;

/// Catalog filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// New product form data.
#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub category: String,
    pub stock: u32,
    pub description: String,
}

/// Product update form data; omitted fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub description: Option<String>,
}

/// List products matching the catalog filter.
#[instrument(skip(state, _user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<Product>> {
    Json(
        state
            .store()
            .products()
            .filtered(query.search.as_deref(), query.category.as_deref()),
    )
}

/// List a new product (suppliers only).
#[instrument(skip(state, user, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(form): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    ensure_supplier(&user)?;

    let product = state.store().products().add(Product {
        // Placeholder; the store assigns the real ID.
        id: ProductId::new(0),
        name: form.name,
        price: form.price,
        category: form.category,
        supplier_id: user.id,
        stock: form.stock,
        rating: DEFAULT_RATING,
        description: form.description,
    });

    tracing::info!(product_id = %product.id, supplier_id = %user.id, "product listed");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product (owner or admin).
#[instrument(skip(state, user, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ProductId>,
    Json(form): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    ensure_owner_or_admin(state.store(), &user, id)?;

    let product = state.store().products().update(id, |product| {
        if let Some(name) = form.name {
            product.name = name;
        }
        if let Some(price) = form.price {
            product.price = price;
        }
        if let Some(category) = form.category {
            product.category = category;
        }
        if let Some(stock) = form.stock {
            product.stock = stock;
        }
        if let Some(description) = form.description {
            product.description = description;
        }
    })?;

    Ok(Json(product))
}

/// Delete a product (owner or admin).
#[instrument(skip(state, user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    ensure_owner_or_admin(state.store(), &user, id)?;

    let product = state.store().products().delete(id)?;
    tracing::info!(product_id = %product.id, "product delisted");

    Ok(StatusCode::NO_CONTENT)
}

fn ensure_supplier(user: &CurrentUser) -> Result<()> {
    if user.role == Role::Supplier {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only suppliers can list products".to_string(),
        ))
    }
}

fn ensure_owner_or_admin(store: &Store, user: &CurrentUser, id: ProductId) -> Result<()> {
    let product = store.products().get(id)?;

    match user.role {
        Role::Admin => Ok(()),
        Role::Supplier if product.supplier_id == user.id => Ok(()),
        _ => Err(AppError::Forbidden(
            "You can only manage your own products".to_string(),
        )),
    }
}
