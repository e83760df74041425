//! User Entity
//!
//! Registered account. Holds the Argon2 password hash alongside the
//! profile data because this service has no separate credential store.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::email::Email;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Email (unique, used for login)
    pub email: Email,
    /// Argon2id PHC-format password hash
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(name: impl Into<String>, email: Email, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name: name.into(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
