//! Current User Use Case
//!
//! Resolves a bearer token to the authenticated user. Used by the auth
//! middleware on every protected request.
//!
//! Side-store semantics:
//! - `Ok(false)` (token revoked or replaced) fails closed: rejected.
//! - `Err` (store unreachable) fails open: signature + expiry decide.

use std::sync::Arc;

use platform::token::TokenService;

use crate::domain::entity::user::User;
use crate::domain::repository::{TokenStoreRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<U, T>
where
    U: UserRepository,
    T: TokenStoreRepository,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    token_service: Arc<TokenService>,
}

impl<U, T> CurrentUserUseCase<U, T>
where
    U: UserRepository,
    T: TokenStoreRepository,
{
    pub fn new(user_repo: Arc<U>, token_store: Arc<T>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            token_store,
            token_service,
        }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let subject = self.token_service.subject(token)?;

        match self.token_store.is_active(token).await {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::TokenInvalid),
            Err(e) => {
                tracing::warn!(error = %e, "Token store unavailable; accepting signed token");
            }
        }

        let email = Email::from_db(subject);
        self.user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
