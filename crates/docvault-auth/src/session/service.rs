//! Account and session facade.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::timeout::with_timeout;
use docvault_database::ledger::{TokenLedger, UserLedger};
use docvault_entity::user::User;

use crate::password::{PasswordHasher, PasswordPolicy};
use crate::token::{Claims, TokenAuthority};

/// High-level account and session operations.
///
/// Every public operation runs under the configured service timeout.
#[derive(Clone)]
pub struct AuthSessionService {
    users: Arc<dyn UserLedger>,
    authority: Arc<TokenAuthority>,
    policy: PasswordPolicy,
    hasher: PasswordHasher,
    default_timeout: Duration,
}

impl std::fmt::Debug for AuthSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionService")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl AuthSessionService {
    /// Wire the service from configuration and its ledgers.
    pub fn new(
        config: &AppConfig,
        users: Arc<dyn UserLedger>,
        tokens: Arc<dyn TokenLedger>,
    ) -> AppResult<Self> {
        let authority = Arc::new(TokenAuthority::new(&config.auth, tokens, users.clone()));
        Ok(Self {
            users,
            authority,
            policy: PasswordPolicy::new(&config.auth),
            hasher: PasswordHasher::new(&config.auth)?,
            default_timeout: config.service.default_timeout(),
        })
    }

    /// The token authority this service issues through.
    pub fn authority(&self) -> Arc<TokenAuthority> {
        self.authority.clone()
    }

    /// Create a new account.
    ///
    /// Fails with `UserAlreadyExists` when the login is taken,
    /// `InvalidLogin` when the login is empty and `InvalidPassword`
    /// when the password fails the composition policy. A login made of
    /// nothing but whitespace counts as empty.
    pub async fn register(&self, login: &str, password: &str) -> AppResult<User> {
        with_timeout(self.default_timeout, "register", async {
            if login.trim().is_empty() {
                return Err(AppError::invalid_login("login must not be empty"));
            }
            if self.users.find_by_login(login).await?.is_some() {
                return Err(AppError::user_already_exists(format!(
                    "login '{login}' is already taken"
                )));
            }
            if !self.policy.validate(password) {
                return Err(AppError::invalid_password(
                    "password does not meet the composition policy",
                ));
            }

            let user = User::new(login.to_string(), self.hasher.hash_password(password)?);
            self.users.create_user(&user).await?;

            info!(user_id = %user.id, login, "registered user");
            Ok(user)
        })
        .await
    }

    /// Verify credentials and issue a fresh session token.
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<String> {
        with_timeout(self.default_timeout, "authenticate", async {
            let user = self
                .users
                .find_by_login(login)
                .await?
                .ok_or_else(|| AppError::user_not_found(format!("no user with login '{login}'")))?;

            if !self.hasher.verify_password(password, &user.password_hash)? {
                return Err(AppError::invalid_password("credentials do not match"));
            }

            let issued = self.authority.issue(&user).await?;
            info!(user_id = %user.id, "authenticated user");
            Ok(issued.token)
        })
        .await
    }

    /// Revoke a session token. Revoking an unknown token succeeds.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        with_timeout(self.default_timeout, "logout", self.authority.revoke(token)).await
    }

    /// Validate a session token and return its claims.
    pub async fn verify_session(&self, token: &str) -> AppResult<Claims> {
        with_timeout(
            self.default_timeout,
            "verify_session",
            self.authority.validate(token),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_core::error::ErrorKind;
    use docvault_database::memory::{MemoryTokenLedger, MemoryUserLedger};

    fn service() -> AuthSessionService {
        let mut config: AppConfig =
            serde_json::from_str(r#"{"database": {"url": "postgres://localhost/docvault"}}"#)
                .unwrap();
        // Low-cost hashing so the tests stay fast.
        config.auth.argon2_memory_kib = 1024;
        config.auth.argon2_iterations = 1;
        AuthSessionService::new(
            &config,
            Arc::new(MemoryUserLedger::new()),
            Arc::new(MemoryTokenLedger::new()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let service = service();
        let user = service.register("alice", "Abcd123!").await.unwrap();
        assert_eq!(user.login, "alice");

        let token = service.authenticate("alice", "Abcd123!").await.unwrap();
        let claims = service.verify_session(&token).await.unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_login_is_rejected() {
        let service = service();
        service.register("alice", "Abcd123!").await.unwrap();
        let err = service.register("alice", "Efgh456!").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_empty_login_is_rejected() {
        let err = service().register("  ", "Abcd123!").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLogin);
    }

    #[tokio::test]
    async fn test_weak_password_is_rejected() {
        let err = service().register("alice", "weak").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPassword);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let service = service();
        service.register("alice", "Abcd123!").await.unwrap();
        let err = service.authenticate("alice", "Wrong12!").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPassword);
    }

    #[tokio::test]
    async fn test_logout_revokes_session() {
        let service = service();
        service.register("alice", "Abcd123!").await.unwrap();
        let token = service.authenticate("alice", "Abcd123!").await.unwrap();

        service.logout(&token).await.unwrap();
        let err = service.verify_session(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);

        // Logging out again is a no-op, not an error.
        service.logout(&token).await.unwrap();
    }
}
