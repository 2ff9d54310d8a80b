//! Cart pricing and checkout.
//!
//! Carts store only product references; pricing resolves them against the
//! live catalog. Checkout validates and commits under a single write guard:
//! stock check, wallet debit, stock decrement, and order insert either all
//! happen or none do.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use marketdeck_core::{Money, OrderStatus, ProductId, UserId};

use crate::models::{Cart, LineItem, Order, Profile};
use crate::store::{Dataset, Store, StoreError};

/// Errors from cart pricing and checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line references a product that has been removed.
    #[error("product {0} is no longer available")]
    ProductUnavailable(ProductId),

    #[error("only {available} of product {product_id} in stock (requested {requested})")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("total {total} exceeds wallet balance {balance}")]
    InsufficientBalance { total: Money, balance: Money },

    /// The checkout user has no wallet (not a customer account).
    #[error("user {0} cannot check out")]
    NotACustomer(UserId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One priced cart line.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// A priced cart.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    /// Sum of `unit_price × quantity` across all lines.
    pub total: Money,
    pub item_count: u32,
}

/// The result of a successful checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub wallet_balance: Money,
}

/// Price a cart against the current catalog.
///
/// An empty cart prices to an empty view; only checkout rejects it.
///
/// # Errors
///
/// Returns `CheckoutError::ProductUnavailable` if a line references a
/// product that no longer exists.
pub fn price_cart(store: &Store, cart: &Cart) -> Result<CartView, CheckoutError> {
    let data = store.read();
    let items = price_lines(&data, cart)?;
    Ok(view_from_lines(items))
}

/// Check out a customer's cart.
///
/// On success the wallet is debited, stock is decremented, the cart's
/// contents become a recorded order (status `processing`, dated today,
/// assigned to an available delivery agent if any), and the customer's
/// order counter advances.
///
/// # Errors
///
/// Returns `CheckoutError` if the cart is empty, a product is gone or
/// understocked, the user is not a customer, or the wallet balance does not
/// cover the total.
pub fn checkout(
    store: &Store,
    customer_id: UserId,
    cart: &Cart,
) -> Result<CheckoutReceipt, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    store.with_write(|data| {
        let lines = price_lines(data, cart)?;

        for line in &lines {
            let available = data
                .product(line.product_id)
                .map_or(0, |p| p.stock);
            if line.quantity > available {
                return Err(CheckoutError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available,
                });
            }
        }

        let total: Money = lines.iter().map(|l| l.line_total).sum();

        // Pick the delivery agent before taking mutable borrows.
        let agent_id = data
            .users
            .iter()
            .find(|u| u.is_available_agent())
            .map(|u| u.id);

        let remaining = {
            let user = data
                .user_mut(customer_id)
                .ok_or(StoreError::UserNotFound(customer_id))?;
            let Profile::Customer {
                wallet_balance,
                order_count,
            } = &mut user.profile
            else {
                return Err(CheckoutError::NotACustomer(customer_id));
            };

            let remaining = wallet_balance
                .checked_sub(total)
                .ok_or(CheckoutError::InsufficientBalance {
                    total,
                    balance: *wallet_balance,
                })?;
            *wallet_balance = remaining;
            *order_count += 1;
            remaining
        };

        // Stock was validated above; missing products cannot appear here.
        for item in &cart.items {
            if let Some(product) = data.product_mut(item.product_id) {
                product.stock -= item.quantity;
            }
        }

        let order = Order {
            id: data.next_order_id(),
            customer_id,
            delivery_agent_id: agent_id,
            total,
            status: OrderStatus::Processing,
            date: Utc::now().date_naive(),
            items: cart
                .items
                .iter()
                .map(|i| LineItem {
                    product_id: i.product_id,
                    quantity: i.quantity,
                })
                .collect(),
        };
        data.orders.push(order.clone());

        Ok(CheckoutReceipt {
            order,
            wallet_balance: remaining,
        })
    })
}

fn price_lines(data: &Dataset, cart: &Cart) -> Result<Vec<CartLineView>, CheckoutError> {
    cart.items
        .iter()
        .map(|item| {
            let product = data
                .product(item.product_id)
                .ok_or(CheckoutError::ProductUnavailable(item.product_id))?;
            Ok(CartLineView {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity: item.quantity,
                line_total: product.price * item.quantity,
            })
        })
        .collect()
}

fn view_from_lines(items: Vec<CartLineView>) -> CartView {
    let total = items.iter().map(|l| l.line_total).sum();
    let item_count = items.iter().map(|l| l.quantity).sum();
    CartView {
        items,
        total,
        item_count,
    }
}
