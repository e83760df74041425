//! Auth Middleware
//!
//! Resolves the bearer token on protected routes and injects the
//! authenticated user into request extensions.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenService;

use crate::application::CurrentUserUseCase;
use crate::domain::repository::{TokenStoreRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::bearer_token;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

/// Authenticated user injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Middleware that requires a valid bearer token
pub async fn require_auth<R>(
    axum::extract::State(state): axum::extract::State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = bearer_token(req.headers()) else {
        return Err(AuthError::MissingToken.into_response());
    };

    let use_case =
        CurrentUserUseCase::new(state.repo.clone(), state.repo.clone(), state.tokens.clone());

    let user = match use_case.execute(&token).await {
        Ok(user) => user,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(AuthUser {
        user_id: user.user_id,
        name: user.name,
        email: user.email.into_db(),
        created_at: user.created_at,
    });

    Ok(next.run(req).await)
}
