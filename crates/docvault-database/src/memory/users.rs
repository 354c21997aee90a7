//! In-memory user ledger.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::user::User;

use crate::ledger::UserLedger;

/// In-memory implementation of [`UserLedger`], keyed by login.
#[derive(Debug, Default)]
pub struct MemoryUserLedger {
    users: DashMap<String, User>,
}

impl MemoryUserLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserLedger for MemoryUserLedger {
    async fn create_user(&self, user: &User) -> AppResult<()> {
        if self.users.contains_key(&user.login) {
            return Err(AppError::new(
                ErrorKind::InsertFailed,
                format!("duplicate login '{}'", user.login),
            ));
        }
        self.users.insert(user.login.clone(), user.clone());
        Ok(())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(login).map(|u| u.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let ledger = MemoryUserLedger::new();
        let user = User::new("alice", "hash");
        ledger.create_user(&user).await.unwrap();

        let found = ledger.find_by_login("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        let by_id = ledger.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.login, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_login_rejected() {
        let ledger = MemoryUserLedger::new();
        ledger.create_user(&User::new("bob", "h1")).await.unwrap();

        let err = ledger
            .create_user(&User::new("bob", "h2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InsertFailed);
    }

    #[tokio::test]
    async fn test_absent_user_is_none() {
        let ledger = MemoryUserLedger::new();
        assert!(ledger.find_by_login("nobody").await.unwrap().is_none());
    }
}
