//! HTTP Handlers
//!
//! Every route here sits behind the auth middleware, which injects the
//! authenticated [`AuthUser`]. Lookups may name an explicit owner via the
//! `userId` query parameter; otherwise the token's user is assumed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

use auth::presentation::middleware::AuthUser;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{OrderId, UserId};
use kernel::page::Page;

use crate::application::{
    CancelOrderUseCase, CreateOrderInput, CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
    UpdateStatusUseCase,
};
use crate::domain::repository::{OrderRepository, UserDirectory};
use crate::domain::value_object::order_status::OrderStatus;
use crate::presentation::dto::{
    CreateOrderRequest, OrderPageParams, OrderResponse, OwnerParams, UpdateStatusRequest,
};

/// Shared state for order handlers
#[derive(Clone)]
pub struct OrdersAppState<R>
where
    R: OrderRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

fn effective_user(params: &OwnerParams, auth_user: &AuthUser) -> UserId {
    params
        .user_id
        .map(UserId::from_uuid)
        .unwrap_or(auth_user.user_id)
}

fn parse_status(value: &str) -> AppResult<OrderStatus> {
    OrderStatus::parse(value)
        .ok_or_else(|| AppError::bad_request(format!("Invalid order status: {value}")))
}

/// POST /api/orders
pub async fn create_order<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<impl IntoResponse>
where
    R: OrderRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = CreateOrderUseCase::new(state.repo.clone(), state.repo.clone());
    let order = use_case
        .execute(CreateOrderInput {
            user_id: auth_user.user_id,
            lines: req.into_lines(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// GET /api/orders/{id}
pub async fn get_order<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerParams>,
) -> AppResult<Json<OrderResponse>>
where
    R: OrderRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let user_id = effective_user(&params, &auth_user);
    let use_case = GetOrderUseCase::new(state.repo.clone());

    let order = use_case
        .execute(&user_id, &OrderId::from_uuid(id))
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

/// GET /api/orders
pub async fn list_orders<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(params): Query<OrderPageParams>,
) -> AppResult<Json<Page<OrderResponse>>>
where
    R: OrderRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let status = params.status.as_deref().map(parse_status).transpose()?;
    let request = params.to_page_request();

    let use_case = ListOrdersUseCase::new(state.repo.clone());
    let page = use_case
        .execute(&auth_user.user_id, status, &request)
        .await?;

    Ok(Json(page.map(OrderResponse::from)))
}

/// PATCH /api/orders/{id}/status
pub async fn update_status<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerParams>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderResponse>>
where
    R: OrderRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let status = parse_status(&req.status)?;
    let user_id = effective_user(&params, &auth_user);

    let use_case = UpdateStatusUseCase::new(state.repo.clone());
    let order = use_case
        .execute(&user_id, &OrderId::from_uuid(id), status)
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

/// DELETE /api/orders/{id}
pub async fn cancel_order<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerParams>,
) -> AppResult<StatusCode>
where
    R: OrderRepository + UserDirectory + Clone + Send + Sync + 'static,
{
    let user_id = effective_user(&params, &auth_user);

    let use_case = CancelOrderUseCase::new(state.repo.clone());
    use_case.execute(&user_id, &OrderId::from_uuid(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
