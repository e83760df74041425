//! Login Use Case
//!
//! Verifies credentials and issues a fresh token. The side-store keeps a
//! single active token per subject, so logging in again invalidates the
//! previous token.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token::TokenService;

use crate::domain::entity::user::User;
use crate::domain::repository::{TokenStoreRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output, shared with registration
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<U, T>
where
    U: UserRepository,
    T: TokenStoreRepository,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    token_service: Arc<TokenService>,
}

impl<U, T> LoginUseCase<U, T>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Invalid email format reads as bad credentials, not a validation
        // error, so responses do not reveal which accounts exist.
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        let verified = user
            .password_hash
            .verify(&password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.token_service.issue(user.email.as_str())?;
        let expires_at =
            chrono::Utc::now() + chrono::Duration::milliseconds(self.token_service.ttl_ms());
        // A failed side-store write never denies the login; the token
        // stays valid on signature and expiry alone.
        if let Err(e) = self
            .token_store
            .store(user.email.as_str(), &token, expires_at)
            .await
        {
            tracing::warn!(error = %e, "Token store write failed, issuing token anyway");
        }

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
