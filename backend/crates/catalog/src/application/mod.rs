//! Application Layer
//!
//! Use cases and application services.

pub mod get_product;
pub mod list_products;

// Re-exports
pub use get_product::GetProductUseCase;
pub use list_products::ListProductsUseCase;
