//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Active-token side-store trait
///
/// Tracks which issued tokens are still valid so logout can revoke
/// before the signature expires. Lookups are advisory: callers treat
/// store errors as "unknown" and fall back to signature + expiry.
#[trait_variant::make(TokenStoreRepository: Send)]
pub trait LocalTokenStoreRepository {
    /// Record a newly issued token for a subject, replacing any
    /// previously active token for the same subject.
    async fn store(&self, subject: &str, token: &str, expires_at: DateTime<Utc>)
    -> AuthResult<()>;

    /// Check whether a token is still active (present and unexpired)
    async fn is_active(&self, token: &str) -> AuthResult<bool>;

    /// Revoke a single token
    async fn revoke(&self, token: &str) -> AuthResult<()>;

    /// Remove expired rows; returns the number deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
