// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User storage layer.
//!
//! The embedding application owns the real user database; the adapter only
//! needs upsert-by-username semantics and lookups. [`MemoryUserStore`] is a
//! complete in-process implementation used by the test suite and by
//! single-process embeddings.

pub mod memory;

pub use memory::MemoryUserStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::LocalUser;

/// Field set written on every successful authentication.
///
/// Every field here unconditionally replaces the stored value; there is no
/// per-field merge. The local record is defined as the projection of the
/// most recent remote profile plus the most recently issued tokens.
#[derive(Debug, Clone)]
pub struct UserUpsert {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Argon2id PHC string for the password submitted at login.
    pub password_hash: String,
    pub staff_view: bool,
    pub access_token: String,
    pub refresh_token: String,
}

/// Local user store with upsert-by-username semantics.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find-or-create the user record for `username` and overwrite it (and
    /// its auth profile) with `fields`.
    ///
    /// The user and auth-profile writes must commit together or not at all;
    /// a failure must not leave a user carrying stale tokens next to fresh
    /// mirrored fields. Implementations back this with a single transaction.
    ///
    /// The store stamps `date_joined` on creation and `last_login` on every
    /// upsert; the upsert happens exactly once per successful login.
    async fn upsert_by_username(&self, username: &str, fields: UserUpsert) -> Result<LocalUser>;

    /// Resolve a previously authenticated user by store ID.
    ///
    /// Used for session rehydration; an unknown ID is `Ok(None)`, not an
    /// error.
    async fn find_by_id(&self, id: u64) -> Result<Option<LocalUser>>;

    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<LocalUser>>;
}
