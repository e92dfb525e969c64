//! User accounts, bearer tokens, and export quota bookkeeping.
//!
//! Auth is deliberately thin: registering or logging in issues an
//! opaque bearer token that maps straight back to a user id. The
//! interesting part is the quota: non-premium users get `free_limit`
//! exports, and the counter only moves on success.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SlidesmithError;

/// Free exports granted to a non-premium account.
pub const DEFAULT_FREE_LIMIT: u32 = 3;

/// One registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default = "default_free_limit")]
    pub free_limit: u32,
    /// Completed exports, bumped by exactly one per success.
    #[serde(default)]
    pub presentations_count: u32,
}

fn default_free_limit() -> u32 {
    DEFAULT_FREE_LIMIT
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            is_premium: false,
            free_limit: DEFAULT_FREE_LIMIT,
            presentations_count: 0,
        }
    }

    /// Whether this user may start another export.
    pub fn can_export(&self) -> bool {
        self.is_premium || self.presentations_count < self.free_limit
    }
}

/// In-memory user registry with a token index.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    tokens: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and issue a bearer token for them.
    pub async fn register(&self, user: User) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.write().await.insert(token.clone(), user.id);
        self.users.write().await.insert(user.id, user);
        token
    }

    /// Issue a fresh token for an existing user.
    pub async fn login(&self, user_id: Uuid) -> Result<String, SlidesmithError> {
        if !self.users.read().await.contains_key(&user_id) {
            return Err(SlidesmithError::NotFound("User not found".into()));
        }
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.write().await.insert(token.clone(), user_id);
        Ok(token)
    }

    /// Case-insensitive email lookup, for login.
    pub async fn by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Resolve a bearer token to its user.
    pub async fn by_token(&self, token: &str) -> Option<User> {
        let user_id = *self.tokens.read().await.get(token)?;
        self.users.read().await.get(&user_id).cloned()
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User, SlidesmithError> {
        self.users
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or_else(|| SlidesmithError::NotFound("User not found".into()))
    }

    /// Quota gate checked before an export starts.
    pub async fn check_quota(&self, user_id: Uuid) -> Result<(), SlidesmithError> {
        let user = self.get(user_id).await?;
        if user.can_export() {
            Ok(())
        } else {
            Err(SlidesmithError::QuotaExceeded(format!(
                "free limit of {} presentations reached",
                user.free_limit
            )))
        }
    }

    /// Record one completed export. Called only after the presentation
    /// record is persisted.
    pub async fn record_export(&self, user_id: Uuid) -> Result<(), SlidesmithError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| SlidesmithError::NotFound("User not found".into()))?;
        user.presentations_count += 1;
        Ok(())
    }

    /// Flip the premium flag, e.g. from a billing webhook.
    pub async fn set_premium(&self, user_id: Uuid, premium: bool) -> Result<(), SlidesmithError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| SlidesmithError::NotFound("User not found".into()))?;
        user.is_premium = premium;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_roundtrip() {
        let store = UserStore::new();
        let user = User::new("Ada", "ada@example.com");
        let id = user.id;
        let token = store.register(user).await;

        let resolved = store.by_token(&token).await.unwrap();
        assert_eq!(resolved.id, id);
        assert!(store.by_token("bogus").await.is_none());
    }

    #[tokio::test]
    async fn test_quota_blocks_at_free_limit() {
        let store = UserStore::new();
        let user = User::new("Ada", "ada@example.com");
        let id = user.id;
        store.register(user).await;

        for _ in 0..DEFAULT_FREE_LIMIT {
            store.check_quota(id).await.unwrap();
            store.record_export(id).await.unwrap();
        }
        assert!(matches!(
            store.check_quota(id).await,
            Err(SlidesmithError::QuotaExceeded(_))
        ));
    }

    #[tokio::test]
    async fn test_premium_ignores_quota() {
        let store = UserStore::new();
        let mut user = User::new("Ada", "ada@example.com");
        user.is_premium = true;
        user.presentations_count = 100;
        let id = user.id;
        store.register(user).await;

        assert!(store.check_quota(id).await.is_ok());
    }
}
