//! Product accessors.

use marketdeck_core::{ProductId, UserId};

use crate::models::Product;

use super::{Store, StoreError};

/// Access to the product catalog.
pub struct ProductStore<'a> {
    store: &'a Store,
}

impl<'a> ProductStore<'a> {
    pub(super) const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All products.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        self.store.read().products.clone()
    }

    /// Products matching the catalog filter (see [`Product::matches`]).
    #[must_use]
    pub fn filtered(&self, search: Option<&str>, category: Option<&str>) -> Vec<Product> {
        self.store
            .read()
            .products
            .iter()
            .filter(|p| p.matches(search, category))
            .cloned()
            .collect()
    }

    /// Products listed by a supplier.
    #[must_use]
    pub fn for_supplier(&self, supplier_id: UserId) -> Vec<Product> {
        self.store
            .read()
            .products
            .iter()
            .filter(|p| p.supplier_id == supplier_id)
            .cloned()
            .collect()
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` if no product has this ID.
    pub fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        self.store
            .read()
            .product(id)
            .cloned()
            .ok_or(StoreError::ProductNotFound(id))
    }

    /// Insert a product, assigning it the next free ID.
    ///
    /// Returns the stored record.
    pub fn add(&self, mut product: Product) -> Product {
        let mut data = self.store.write();
        product.id = data.next_product_id();
        data.products.push(product.clone());
        product
    }

    /// Apply an update to a product and return the new record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` if no product has this ID.
    pub fn update(
        &self,
        id: ProductId,
        f: impl FnOnce(&mut Product),
    ) -> Result<Product, StoreError> {
        let mut data = self.store.write();
        let product = data.product_mut(id).ok_or(StoreError::ProductNotFound(id))?;
        f(product);
        Ok(product.clone())
    }

    /// Remove a product and return it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` if no product has this ID.
    pub fn delete(&self, id: ProductId) -> Result<Product, StoreError> {
        let mut data = self.store.write();
        let index = data
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProductNotFound(id))?;
        Ok(data.products.remove(index))
    }
}
