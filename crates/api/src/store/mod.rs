//! In-memory data store.
//!
//! All records live in a single [`Dataset`] behind a process-wide `RwLock`;
//! nothing is persisted and the store resets on restart. Per-entity accessors
//! ([`UserStore`], [`ProductStore`], [`OrderStore`]) borrow the store the way
//! a repository borrows a connection pool. Multi-entity mutations (checkout)
//! go through [`Store::with_write`] so they commit under one write guard.

pub mod orders;
pub mod products;
pub mod seed;
pub mod users;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use marketdeck_core::{Money, OrderId, OrderStatus, ProductId, UserId};

use crate::models::{Order, Product, User};

pub use orders::OrderStore;
pub use products::ProductStore;
pub use users::UserStore;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
    #[error("order cannot move from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Seeded analytics surfaced on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub top_categories: Vec<CategorySales>,
}

/// Revenue and order volume for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Money,
    pub orders: u32,
}

/// Sales attributed to one product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: Money,
    pub percentage: u8,
}

/// The complete in-memory dataset.
#[derive(Debug)]
pub struct Dataset {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub analytics: Analytics,
}

impl Dataset {
    /// Find a user by ID.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Find a user by ID, mutably.
    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Find a product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Find a product by ID, mutably.
    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// The next unused product ID.
    #[must_use]
    pub fn next_product_id(&self) -> ProductId {
        let max = self.products.iter().map(|p| p.id.as_i32()).max();
        ProductId::new(max.unwrap_or(0) + 1)
    }

    /// The next unused order ID.
    #[must_use]
    pub fn next_order_id(&self) -> OrderId {
        let max = self.orders.iter().map(|o| o.id.as_i32()).max();
        OrderId::new(max.unwrap_or(0) + 1)
    }
}

/// Thread-safe handle to the dataset.
#[derive(Debug)]
pub struct Store {
    data: RwLock<Dataset>,
}

impl Store {
    /// Create a store over a dataset.
    #[must_use]
    pub const fn new(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
        }
    }

    /// User accessors.
    #[must_use]
    pub const fn users(&self) -> UserStore<'_> {
        UserStore::new(self)
    }

    /// Product accessors.
    #[must_use]
    pub const fn products(&self) -> ProductStore<'_> {
        ProductStore::new(self)
    }

    /// Order accessors.
    #[must_use]
    pub const fn orders(&self) -> OrderStore<'_> {
        OrderStore::new(self)
    }

    /// A snapshot of the seeded analytics.
    #[must_use]
    pub fn analytics(&self) -> Analytics {
        self.read().analytics.clone()
    }

    /// Run `f` with exclusive access to the dataset.
    ///
    /// Mutations that must commit together (e.g. checkout: wallet debit,
    /// stock decrement, order insert) go through here.
    pub fn with_write<T>(&self, f: impl FnOnce(&mut Dataset) -> T) -> T {
        f(&mut self.write())
    }

    /// Acquire the read guard.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned (a handler panicked mid-write).
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Dataset> {
        self.data.read().expect("store lock poisoned")
    }

    /// Acquire the write guard.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned (a handler panicked mid-write).
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.data.write().expect("store lock poisoned")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_next_ids_follow_max() {
        let store = Store::new(seed::demo());
        let (next_product, next_order) =
            store.with_write(|data| (data.next_product_id(), data.next_order_id()));

        assert_eq!(next_product, ProductId::new(11));
        assert_eq!(next_order, OrderId::new(5));
    }

    #[test]
    fn test_analytics_snapshot() {
        let store = Store::new(seed::demo());
        let analytics = store.analytics();

        assert_eq!(analytics.monthly_revenue.len(), 12);
        assert_eq!(analytics.top_categories.len(), 4);
        let december = analytics.monthly_revenue.last().unwrap();
        assert_eq!(december.month, "Dec");
        assert_eq!(december.revenue, "89000".parse().unwrap());
    }
}
