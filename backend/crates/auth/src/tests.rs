//! Unit tests for the auth crate
//!
//! Uses in-memory repositories to exercise the use cases without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use kernel::id::UserId;
use platform::token::TokenService;

use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::{TokenStoreRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

const TEST_SECRET: &str = "a3f1c2d4e5b6978812345678deadbeefcafebabe00112233445566778899aabb";

/// In-memory repository standing in for PgAuthRepository
#[derive(Default)]
struct MemAuthRepo {
    users: Mutex<HashMap<UserId, User>>,
    // token -> (subject, expiry)
    tokens: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
    fail_token_reads: AtomicBool,
    fail_token_writes: AtomicBool,
}

impl MemAuthRepo {
    fn active_token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

impl UserRepository for Arc<MemAuthRepo> {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email == *email))
    }
}

impl TokenStoreRepository for Arc<MemAuthRepo> {
    async fn store(
        &self,
        subject: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        if self.fail_token_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("token store down".to_string()));
        }
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|_, (sub, _)| sub != subject);
        tokens.insert(token.to_string(), (subject.to_string(), expires_at));
        Ok(())
    }

    async fn is_active(&self, token: &str) -> AuthResult<bool> {
        if self.fail_token_reads.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("token store down".to_string()));
        }
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .get(token)
            .is_some_and(|(_, exp)| *exp > Utc::now()))
    }

    async fn revoke(&self, token: &str) -> AuthResult<()> {
        if self.fail_token_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("token store down".to_string()));
        }
        self.tokens.lock().unwrap().remove(token);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|_, (_, exp)| *exp > Utc::now());
        Ok((before - tokens.len()) as u64)
    }
}

fn setup() -> (Arc<MemAuthRepo>, Arc<TokenService>) {
    let repo = Arc::new(MemAuthRepo::default());
    let tokens = Arc::new(TokenService::from_secret(TEST_SECRET, 60_000).unwrap());
    (repo, tokens)
}

async fn register_alice(repo: &Arc<MemAuthRepo>, tokens: &Arc<TokenService>) -> String {
    let use_case = RegisterUseCase::new(
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        tokens.clone(),
    );
    let output = use_case
        .execute(RegisterInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();
    output.token
}

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn register_creates_user_and_issues_token() {
        let (repo, tokens) = setup();
        let token = register_alice(&repo, &tokens).await;

        assert_eq!(tokens.subject(&token).unwrap(), "alice@example.com");
        assert_eq!(repo.active_token_count(), 1);
        assert_eq!(repo.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let (repo, tokens) = setup();
        register_alice(&repo, &tokens).await;

        let use_case = RegisterUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let err = use_case
            .execute(RegisterInput {
                name: "Alice Again".to_string(),
                // Email comparison is case-insensitive after normalization
                email: "ALICE@example.com".to_string(),
                password: "another-secret".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let (repo, tokens) = setup();
        let use_case = RegisterUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let err = use_case
            .execute(RegisterInput {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                password: "abc".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
    }
}

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn login_with_correct_password() {
        let (repo, tokens) = setup();
        register_alice(&repo, &tokens).await;

        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let output = use_case
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.user.name, "Alice");
        assert_eq!(tokens.subject(&output.token).unwrap(), "alice@example.com");
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let (repo, tokens) = setup();
        register_alice(&repo, &tokens).await;

        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let err = use_case
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_unknown_email_fails_the_same_way() {
        let (repo, tokens) = setup();

        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let err = use_case
            .execute(LoginInput {
                email: "nobody@example.com".to_string(),
                password: "whatever123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn second_login_replaces_active_token() {
        let (repo, tokens) = setup();
        let first_token = register_alice(&repo, &tokens).await;

        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        use_case
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        // Single active token per subject
        assert_eq!(repo.active_token_count(), 1);

        let current = CurrentUserUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let err = current.execute(&first_token).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }
}

mod token_check_tests {
    use super::*;

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let (repo, tokens) = setup();
        let token = register_alice(&repo, &tokens).await;

        let current = CurrentUserUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let user = current.execute(&token).await.unwrap();
        assert_eq!(user.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() {
        let (repo, tokens) = setup();
        let token = register_alice(&repo, &tokens).await;

        let logout = LogoutUseCase::new(Arc::new(repo.clone()));
        logout.execute(&token).await.unwrap();

        let current = CurrentUserUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let err = current.execute(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn store_outage_fails_open() {
        let (repo, tokens) = setup();
        let token = register_alice(&repo, &tokens).await;

        repo.fail_token_reads.store(true, Ordering::SeqCst);

        // Signed, unexpired token still passes while the store is down
        let current = CurrentUserUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let user = current.execute(&token).await.unwrap();
        assert_eq!(user.name, "Alice");
    }

    #[tokio::test]
    async fn store_write_outage_does_not_deny_register_or_login() {
        let (repo, tokens) = setup();

        repo.fail_token_writes.store(true, Ordering::SeqCst);

        // Registration still succeeds and its token still authenticates;
        // only the side-store row is missing.
        let token = register_alice(&repo, &tokens).await;
        assert_eq!(repo.active_token_count(), 0);

        let login = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let output = login
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(tokens.subject(&output.token).unwrap(), "alice@example.com");

        // With reads also failing, signature and expiry alone decide
        repo.fail_token_reads.store(true, Ordering::SeqCst);
        let current = CurrentUserUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        assert!(current.execute(&token).await.is_ok());
    }

    #[tokio::test]
    async fn revoke_outage_does_not_fail_logout() {
        let (repo, tokens) = setup();
        let token = register_alice(&repo, &tokens).await;

        repo.fail_token_writes.store(true, Ordering::SeqCst);

        let logout = LogoutUseCase::new(Arc::new(repo.clone()));
        assert!(logout.execute(&token).await.is_ok());

        // The revocation did not land; the token stays active until expiry
        assert_eq!(repo.active_token_count(), 1);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let (repo, tokens) = setup();
        register_alice(&repo, &tokens).await;

        let current = CurrentUserUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            tokens.clone(),
        );
        let err = current.execute("not.a.jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn cleanup_removes_expired_rows() {
        let (repo, _tokens) = setup();
        repo.store(
            "old@example.com",
            "stale-token",
            Utc::now() - chrono::Duration::minutes(5),
        )
        .await
        .unwrap();

        let deleted = repo.cleanup_expired().await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(repo.active_token_count(), 0);
    }
}
