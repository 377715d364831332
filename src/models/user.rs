// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local user record and its auth profile extension.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AuthError, Result};

/// Local user record, keyed by unique username.
///
/// Created on the first successful authentication for a username and
/// updated in place on every subsequent one; the mirrored fields are always
/// the projection of the most recently fetched remote profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    /// Store-assigned ID, stable across updates.
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Argon2id PHC string, set from the password submitted at login.
    pub password_hash: String,
    /// When the record was first created.
    pub date_joined: DateTime<Utc>,
    /// Last successful authentication, if any.
    pub last_login: Option<DateTime<Utc>>,
    /// One-to-one auth profile; lives and dies with the user record.
    pub auth_profile: AuthProfile,
}

impl LocalUser {
    /// Check a plaintext password against the stored hash.
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }
}

/// Auth profile extension holding the staff-view flag and the most recently
/// issued token pair.
#[derive(Debug, Clone, Serialize)]
pub struct AuthProfile {
    pub staff_view: bool,
    pub access_token: String,
    pub refresh_token: String,
}

/// Tolerates the historical record shape where the two token fields were
/// collapsed into a single opaque `api_token`. A legacy token populates
/// `access_token` and leaves `refresh_token` empty; only the two-field
/// shape is ever written back.
impl<'de> Deserialize<'de> for AuthProfile {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawAuthProfile {
            #[serde(default)]
            staff_view: bool,
            #[serde(default)]
            access_token: Option<String>,
            #[serde(default)]
            refresh_token: Option<String>,
            #[serde(default)]
            api_token: Option<String>,
        }

        let raw = RawAuthProfile::deserialize(deserializer)?;
        Ok(AuthProfile {
            staff_view: raw.staff_view,
            access_token: raw.access_token.or(raw.api_token).unwrap_or_default(),
            refresh_token: raw.refresh_token.unwrap_or_default(),
        })
    }
}

/// Hash a plaintext password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a plaintext password against an Argon2id PHC string.
///
/// An unparseable hash verifies as false rather than erroring; a corrupted
/// stored hash must never authenticate anyone.
pub fn verify_password(password: &str, phc_hash: &str) -> bool {
    PasswordHash::new(phc_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
