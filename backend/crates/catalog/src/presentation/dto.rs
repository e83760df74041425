//! API DTOs (Data Transfer Objects)

use kernel::page::{DEFAULT_PAGE_SIZE, PageRequest, SortDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::product::Product;

/// Paging query parameters for catalog reads
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageParams {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ProductPageParams {
    pub fn to_page_request(&self) -> PageRequest {
        let direction = self
            .direction
            .as_deref()
            .map(|d| SortDirection::parse_or(d, SortDirection::Asc))
            .unwrap_or(SortDirection::Asc);

        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort.as_deref().unwrap_or("name"),
            direction,
        )
    }
}

/// Product response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.product_id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
        }
    }
}
