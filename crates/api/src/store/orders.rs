//! Order accessors.

use marketdeck_core::{OrderId, OrderStatus, UserId};

use crate::models::Order;

use super::{Store, StoreError};

/// Access to recorded orders.
pub struct OrderStore<'a> {
    store: &'a Store,
}

impl<'a> OrderStore<'a> {
    pub(super) const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All orders.
    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.store.read().orders.clone()
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OrderNotFound` if no order has this ID.
    pub fn get(&self, id: OrderId) -> Result<Order, StoreError> {
        self.store
            .read()
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(StoreError::OrderNotFound(id))
    }

    /// Orders placed by a customer.
    #[must_use]
    pub fn for_customer(&self, customer_id: UserId) -> Vec<Order> {
        self.store
            .read()
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// Orders assigned to a delivery agent.
    #[must_use]
    pub fn for_agent(&self, agent_id: UserId) -> Vec<Order> {
        self.store
            .read()
            .orders
            .iter()
            .filter(|o| o.delivery_agent_id == Some(agent_id))
            .cloned()
            .collect()
    }

    /// Orders containing at least one of the supplier's products.
    #[must_use]
    pub fn for_supplier(&self, supplier_id: UserId) -> Vec<Order> {
        let data = self.store.read();
        data.orders
            .iter()
            .filter(|o| {
                o.items.iter().any(|item| {
                    data.product(item.product_id)
                        .is_some_and(|p| p.supplier_id == supplier_id)
                })
            })
            .cloned()
            .collect()
    }

    /// Move an order to a new status, enforcing the transition rules of
    /// [`OrderStatus`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OrderNotFound` if no order has this ID, or
    /// `StoreError::InvalidTransition` if the move is not allowed.
    pub fn transition(&self, id: OrderId, next: OrderStatus) -> Result<Order, StoreError> {
        let mut data = self.store.write();
        let order = data
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::OrderNotFound(id))?;

        if !order.status.can_transition_to(next) {
            return Err(StoreError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        order.status = next;
        Ok(order.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn test_role_scoped_queries() {
        let store = Store::new(seed::demo());

        let customer1: Vec<_> = store
            .orders()
            .for_customer(UserId::new(5))
            .iter()
            .map(|o| o.id.as_i32())
            .collect();
        assert_eq!(customer1, vec![1, 4]);

        let agent1: Vec<_> = store
            .orders()
            .for_agent(UserId::new(8))
            .iter()
            .map(|o| o.id.as_i32())
            .collect();
        assert_eq!(agent1, vec![1, 3]);

        // Supplier 3 (Fashion Forward) appears only in order 2.
        let fashion: Vec<_> = store
            .orders()
            .for_supplier(UserId::new(3))
            .iter()
            .map(|o| o.id.as_i32())
            .collect();
        assert_eq!(fashion, vec![2]);
    }

    #[test]
    fn test_transition_enforces_rules() {
        let store = Store::new(seed::demo());
        // Order 3 is seeded as processing.
        let id = OrderId::new(3);

        assert!(matches!(
            store.orders().transition(id, OrderStatus::Delivered),
            Err(StoreError::InvalidTransition { .. })
        ));

        let moved = store.orders().transition(id, OrderStatus::InTransit).unwrap();
        assert_eq!(moved.status, OrderStatus::InTransit);

        let done = store.orders().transition(id, OrderStatus::Delivered).unwrap();
        assert_eq!(done.status, OrderStatus::Delivered);

        assert!(matches!(
            store.orders().transition(id, OrderStatus::Cancelled),
            Err(StoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_transition_unknown_order() {
        let store = Store::new(seed::demo());
        assert!(matches!(
            store.orders().transition(OrderId::new(42), OrderStatus::Cancelled),
            Err(StoreError::OrderNotFound(_))
        ));
    }
}
