//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use platform::token::TokenService;

use crate::domain::repository::{TokenStoreRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, tokens: Arc<TokenService>) -> Router {
    auth_router_generic(repo, tokens)
}

/// Create a generic auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let state = AuthAppState {
        repo: repo.clone(),
        tokens: tokens.clone(),
    };
    let mw_state = AuthMiddlewareState { repo, tokens };

    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(mw_state, require_auth::<R>))
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}
