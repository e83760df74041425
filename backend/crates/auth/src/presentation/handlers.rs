//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use kernel::error::app_error::AppResult;
use platform::token::TokenService;

use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{TokenStoreRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MeResponse, MessageResponse, RegisterRequest,
};
use crate::presentation::middleware::AuthUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse>
where
    R: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.repo.clone(), state.tokens.clone());

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;
    let body = AuthResponse::new(output.token, &output.user);

    Ok((StatusCode::CREATED, Json(body)))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>>
where
    R: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.tokens.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(AuthResponse::new(output.token, &output.user)))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AppResult<Json<MessageResponse>>
where
    R: UserRepository + TokenStoreRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(&headers).ok_or(AuthError::MissingToken)?;

    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(&token).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully",
    }))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
///
/// The auth middleware resolves the token and injects [`AuthUser`].
pub async fn me(user: axum::Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.user_id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at,
    })
}

/// Pull the raw token out of the Authorization header
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(TokenService::extract_from_header)
        .map(|s| s.to_string())
}
