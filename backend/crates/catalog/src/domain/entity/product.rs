//! Product Entity
//!
//! Catalog products are pre-seeded; the order workflow is the only writer
//! (stock decrements during reservation). Names are unique case-insensitively
//! so order lines can reference products by name.

use kernel::id::ProductId;
use rust_decimal::Decimal;

/// Product entity
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: ProductId,
    /// Unique case-insensitively
    pub name: String,
    pub description: String,
    /// Canonical unit price; order lines snapshot this value
    pub price: Decimal,
    /// Never negative
    pub stock: i32,
    pub category: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        stock: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            product_id: ProductId::new(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
            category: category.into(),
        }
    }

    /// Whether the product can cover a requested quantity
    pub fn can_fulfill(&self, quantity: i32) -> bool {
        quantity > 0 && self.stock >= quantity
    }

    /// Take stock for a reservation. Callers must check `can_fulfill`
    /// first; this saturates rather than going negative.
    pub fn deduct(&mut self, quantity: i32) {
        self.stock = (self.stock - quantity).max(0);
    }
}
