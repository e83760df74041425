//! Logout Use Case
//!
//! Drops the presented token from the active-token side-store. The JWT
//! itself stays cryptographically valid until expiry; the side-store is
//! what makes subsequent authenticated requests fail.

use std::sync::Arc;

use crate::domain::repository::TokenStoreRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<T>
where
    T: TokenStoreRepository,
{
    token_store: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: TokenStoreRepository,
{
    pub fn new(token_store: Arc<T>) -> Self {
        Self { token_store }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        // A failed revocation never fails the logout; the token still
        // dies at its expiry timestamp.
        match self.token_store.revoke(token).await {
            Ok(()) => tracing::debug!("Token revoked"),
            Err(e) => tracing::warn!(error = %e, "Token revocation failed, continuing"),
        }
        Ok(())
    }
}
