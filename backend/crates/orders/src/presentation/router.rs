//! Orders Router
//!
//! All order routes require authentication; the auth crate's middleware
//! resolves the bearer token before any handler runs.

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

use auth::domain::repository::{TokenStoreRepository, UserRepository};
use auth::presentation::middleware::{AuthMiddlewareState, require_auth};

use crate::domain::repository::{OrderRepository, UserDirectory};
use crate::infra::postgres::PgOrderRepository;
use crate::presentation::handlers::{self, OrdersAppState};

/// Create the orders router with PostgreSQL repositories
pub fn orders_router(
    repo: PgOrderRepository,
    auth_state: AuthMiddlewareState<auth::PgAuthRepository>,
) -> Router {
    orders_router_generic(repo, auth_state)
}

/// Create a generic orders router for any repository implementation
pub fn orders_router_generic<R, A>(repo: R, auth_state: AuthMiddlewareState<A>) -> Router
where
    R: OrderRepository + UserDirectory + Clone + Send + Sync + 'static,
    A: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    let state = OrdersAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", post(handlers::create_order::<R>))
        .route("/", get(handlers::list_orders::<R>))
        .route("/{id}", get(handlers::get_order::<R>))
        .route("/{id}/status", patch(handlers::update_status::<R>))
        .route("/{id}", delete(handlers::cancel_order::<R>))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            require_auth::<A>,
        ))
        .with_state(state)
}
