//! Order queries scoped by role.

use marketdeck_core::Role;

use crate::models::{CurrentUser, Order, OrderView};
use crate::store::Store;

/// Orders visible to a user: admins see all, customers their own, delivery
/// agents their assignments, suppliers any order containing their products.
#[must_use]
pub fn visible_to(store: &Store, user: &CurrentUser) -> Vec<Order> {
    match user.role {
        Role::Admin => store.orders().list(),
        Role::Customer => store.orders().for_customer(user.id),
        Role::DeliveryAgent => store.orders().for_agent(user.id),
        Role::Supplier => store.orders().for_supplier(user.id),
    }
}

/// Build API views for a set of orders, joining in customer names.
#[must_use]
pub fn views(store: &Store, orders: &[Order]) -> Vec<OrderView> {
    orders
        .iter()
        .map(|order| {
            let name = store
                .users()
                .get(order.customer_id)
                .map_or_else(|_| "Unknown".to_string(), |u| u.name);
            OrderView::new(order, name)
        })
        .collect()
}
