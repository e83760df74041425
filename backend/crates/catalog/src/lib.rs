//! Catalog (Product Browsing) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Product entity and repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Read-only from the API: products are pre-seeded and only the order
//! workflow mutates stock. Listings hide out-of-stock products.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entity::product::Product;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};
