//! Register Use Case
//!
//! Creates a new user account and issues its first token.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token::TokenService;

use crate::application::login::LoginOutput;
use crate::domain::entity::user::User;
use crate::domain::repository::{TokenStoreRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U, T>
where
    U: UserRepository,
    T: TokenStoreRepository,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    token_service: Arc<TokenService>,
}

impl<U, T> RegisterUseCase<U, T>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<LoginOutput> {
        let email =
            Email::new(input.email).map_err(|e| AuthError::Validation(e.message().to_string()))?;

        // Uniqueness check; the unique index is the real guard
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let password_hash = password
            .hash()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(input.name.trim(), email, password_hash);
        self.user_repo.create(&user).await?;

        let token = self.token_service.issue(user.email.as_str())?;
        let expires_at =
            chrono::Utc::now() + chrono::Duration::milliseconds(self.token_service.ttl_ms());
        // A failed side-store write never denies the registration; the
        // token stays valid on signature and expiry alone.
        if let Err(e) = self
            .token_store
            .store(user.email.as_str(), &token, expires_at)
            .await
        {
            tracing::warn!(error = %e, "Token store write failed, issuing token anyway");
        }

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(LoginOutput { token, user })
    }
}
