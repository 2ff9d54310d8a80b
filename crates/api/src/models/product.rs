//! Product domain type.

use serde::{Deserialize, Serialize};

use marketdeck_core::{Money, ProductId, UserId};

/// Rating assigned to newly listed products until reviews exist.
pub const DEFAULT_RATING: f64 = 4.0;

/// A product listed by a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub category: String,
    /// The supplier who listed this product.
    pub supplier_id: UserId,
    pub stock: u32,
    pub rating: f64,
    pub description: String,
}

impl Product {
    /// Single-pass catalog filter: case-insensitive substring match on name
    /// or description, combined with category equality.
    ///
    /// `None` (or an empty search term) matches everything for that
    /// dimension.
    #[must_use]
    pub fn matches(&self, search: Option<&str>, category: Option<&str>) -> bool {
        let matches_search = match search {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                self.name.to_lowercase().contains(&term)
                    || self.description.to_lowercase().contains(&term)
            }
        };
        let matches_category = match category {
            None | Some("") => true,
            Some(category) => self.category == category,
        };
        matches_search && matches_category
    }

    /// Whether any units are in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
