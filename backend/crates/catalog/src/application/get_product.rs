//! Get Product Use Case

use std::sync::Arc;

use kernel::id::ProductId;

use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// Get product use case
pub struct GetProductUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> GetProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, product_id: &ProductId) -> CatalogResult<Product> {
        self.product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }
}
