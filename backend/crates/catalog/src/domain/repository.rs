//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::ProductId;
use kernel::page::PageRequest;

use crate::domain::entity::product::Product;
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Find product by ID
    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<Product>>;

    /// One page of in-stock products, optionally filtered by category.
    /// Returns the page rows and the total matching row count.
    async fn find_page(
        &self,
        category: Option<&str>,
        request: &PageRequest,
    ) -> CatalogResult<(Vec<Product>, u64)>;
}
