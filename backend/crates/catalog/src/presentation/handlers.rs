//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use std::sync::Arc;
use uuid::Uuid;

use kernel::error::app_error::AppResult;
use kernel::id::ProductId;
use kernel::page::Page;

use crate::application::{GetProductUseCase, ListProductsUseCase};
use crate::domain::repository::ProductRepository;
use crate::presentation::dto::{ProductPageParams, ProductResponse};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<P>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
}

/// GET /api/products
pub async fn list_products<P>(
    State(state): State<CatalogAppState<P>>,
    Query(params): Query<ProductPageParams>,
) -> AppResult<Json<Page<ProductResponse>>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListProductsUseCase::new(state.repo.clone());
    let request = params.to_page_request();

    let page = use_case
        .execute(params.category.as_deref(), &request)
        .await?;

    Ok(Json(page.map(ProductResponse::from)))
}

/// GET /api/products/category/{category}
pub async fn list_products_by_category<P>(
    State(state): State<CatalogAppState<P>>,
    Path(category): Path<String>,
    Query(params): Query<ProductPageParams>,
) -> AppResult<Json<Page<ProductResponse>>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListProductsUseCase::new(state.repo.clone());
    let request = params.to_page_request();

    let page = use_case.execute(Some(&category), &request).await?;

    Ok(Json(page.map(ProductResponse::from)))
}

/// GET /api/products/{id}
pub async fn get_product<P>(
    State(state): State<CatalogAppState<P>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductResponse>>
where
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProductUseCase::new(state.repo.clone());

    let product = use_case.execute(&ProductId::from_uuid(id)).await?;

    Ok(Json(ProductResponse::from(product)))
}
