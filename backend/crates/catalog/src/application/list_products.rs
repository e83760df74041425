//! List Products Use Case
//!
//! Paged catalog reads. Only products with stock on hand are listed;
//! sold-out products stay hidden until restocked.

use std::sync::Arc;

use kernel::page::{Page, PageRequest};

use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

/// List products use case
pub struct ListProductsUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> ListProductsUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(
        &self,
        category: Option<&str>,
        request: &PageRequest,
    ) -> CatalogResult<Page<Product>> {
        let (products, total) = self.product_repo.find_page(category, request).await?;
        Ok(Page::new(products, total, request))
    }
}
