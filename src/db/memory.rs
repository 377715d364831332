// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory user store.
//!
//! The whole map sits behind one async mutex, so concurrent logins for the
//! same username serialize and the combined user + auth-profile write is
//! atomic: the updated record is built in full and swapped in with a single
//! map insertion.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::db::{UserStore, UserUpsert};
use crate::error::{AuthError, Result};
use crate::models::user::AuthProfile;
use crate::models::LocalUser;

/// In-memory [`UserStore`] implementation.
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
    /// When set, every write fails with a store error. Mirrors a database
    /// outage for tests exercising the fatal-failure path.
    fail_writes: AtomicBool,
}

struct Inner {
    /// Users keyed by unique username.
    users: HashMap<String, LocalUser>,
    next_id: u64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                next_id: 1,
            }),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.inner.lock().await.users.len()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn upsert_by_username(&self, username: &str, fields: UserUpsert) -> Result<LocalUser> {
        let mut inner = self.inner.lock().await;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Store("write failed (store offline)".to_string()));
        }

        let now = Utc::now();
        let existing = inner.users.get(username).map(|u| (u.id, u.date_joined));
        let (id, date_joined) = match existing {
            Some(identity) => identity,
            None => {
                let id = inner.next_id;
                inner.next_id += 1;
                (id, now)
            }
        };

        let user = LocalUser {
            id,
            username: username.to_string(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            is_staff: fields.is_staff,
            is_superuser: fields.is_superuser,
            password_hash: fields.password_hash,
            date_joined,
            last_login: Some(now),
            auth_profile: AuthProfile {
                staff_view: fields.staff_view,
                access_token: fields.access_token,
                refresh_token: fields.refresh_token,
            },
        };

        inner.users.insert(username.to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<LocalUser>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<LocalUser>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert_fields(token: &str) -> UserUpsert {
        UserUpsert {
            first_name: "Alice".to_string(),
            last_name: "Example".to_string(),
            email: "alice@example.com".to_string(),
            is_staff: false,
            is_superuser: false,
            password_hash: "$argon2id$test".to_string(),
            staff_view: false,
            access_token: token.to_string(),
            refresh_token: format!("refresh-{token}"),
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_updates_in_place() {
        let store = MemoryUserStore::new();

        let created = store
            .upsert_by_username("alice", upsert_fields("A"))
            .await
            .unwrap();
        let updated = store
            .upsert_by_username("alice", upsert_fields("B"))
            .await
            .unwrap();

        assert_eq!(created.id, updated.id);
        assert_eq!(created.date_joined, updated.date_joined);
        assert_eq!(updated.auth_profile.access_token, "B");
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn upsert_assigns_distinct_ids_per_username() {
        let store = MemoryUserStore::new();

        let alice = store
            .upsert_by_username("alice", upsert_fields("A"))
            .await
            .unwrap();
        let bob = store
            .upsert_by_username("bob", upsert_fields("B"))
            .await
            .unwrap();

        assert_ne!(alice.id, bob.id);
        assert_eq!(store.user_count().await, 2);
    }

    #[tokio::test]
    async fn failed_write_leaves_previous_state_intact() {
        let store = MemoryUserStore::new();
        store
            .upsert_by_username("alice", upsert_fields("A"))
            .await
            .unwrap();

        store.set_fail_writes(true);
        let result = store.upsert_by_username("alice", upsert_fields("B")).await;
        assert!(matches!(result, Err(AuthError::Store(_))));

        // The stored record still carries the pre-failure tokens.
        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.auth_profile.access_token, "A");
        assert_eq!(stored.auth_profile.refresh_token, "refresh-A");
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let store = MemoryUserStore::new();
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_upserts_for_one_username_converge() {
        let store = std::sync::Arc::new(MemoryUserStore::new());

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.upsert_by_username("alice", upsert_fields("A")).await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.upsert_by_username("alice", upsert_fields("B")).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(store.user_count().await, 1);
        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        // One of the two writers won outright; tokens stay paired.
        assert_eq!(
            stored.auth_profile.refresh_token,
            format!("refresh-{}", stored.auth_profile.access_token)
        );
    }
}
