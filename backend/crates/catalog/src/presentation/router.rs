//! Catalog Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::ProductRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository) -> Router {
    catalog_router_generic(repo)
}

/// Create a generic catalog router for any repository implementation
pub fn catalog_router_generic<P>(repo: P) -> Router
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_products::<P>))
        .route(
            "/category/{category}",
            get(handlers::list_products_by_category::<P>),
        )
        .route("/{id}", get(handlers::get_product::<P>))
        .with_state(state)
}
