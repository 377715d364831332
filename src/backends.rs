// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication backends and the ordered backend chain.
//!
//! One login attempt against [`OAuthPasswordBackend`] is a short sequence:
//! issue tokens, fetch the profile with the access token, reconcile the
//! local user record. The three failure points map to three very different
//! outcomes, captured by [`AuthOutcome`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AuthConfig;
use crate::db::{UserStore, UserUpsert};
use crate::error::{AuthError, Result};
use crate::models::user::hash_password;
use crate::models::LocalUser;
use crate::services::{OAuthClient, Profile, ProfileClient, TokenPair};

/// Outcome of one backend's authentication attempt.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// Credentials accepted; the local record is synced and resolved.
    Authenticated(LocalUser),
    /// This backend cannot vouch for the credentials. A chain keeps trying
    /// its remaining backends.
    NotApplicable,
    /// Definitive denial. A chain stops here; falling through would mask a
    /// real fault.
    Denied(String),
}

impl AuthOutcome {
    /// The authenticated user, if any.
    pub fn user(self) -> Option<LocalUser> {
        match self {
            AuthOutcome::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// One link in an ordered chain of authenticators.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Try to authenticate the given credentials.
    ///
    /// `Err` is reserved for internal failures (storage, hashing); ordinary
    /// rejection is expressed through [`AuthOutcome`].
    async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome>;

    /// Resolve a previously authenticated user by store ID, for session
    /// rehydration. Unknown IDs are `Ok(None)`.
    async fn get_user(&self, user_id: u64) -> Result<Option<LocalUser>>;
}

/// Authenticates against the OAuth authorization server using the
/// resource-owner password grant, then syncs the local user record from the
/// remote profile.
///
/// This backend should be placed after a backend that checks the local
/// store directly: a token-endpoint rejection here is indistinguishable
/// from "this user isn't an OAuth user", so it soft-fails instead of
/// denying.
pub struct OAuthPasswordBackend<S> {
    oauth: OAuthClient,
    profiles: ProfileClient,
    store: Arc<S>,
}

impl<S: UserStore> OAuthPasswordBackend<S> {
    /// Create a backend from the adapter configuration and a user store.
    pub fn new(config: &AuthConfig, store: Arc<S>) -> Self {
        Self {
            oauth: OAuthClient::new(config),
            profiles: ProfileClient::new(config),
            store,
        }
    }

    /// Project the fetched profile and fresh tokens into the local store.
    ///
    /// The store commits the user and auth-profile writes in one
    /// transaction; any failure here is fatal to the attempt and
    /// propagates unchanged.
    async fn reconcile_user(
        &self,
        profile: &Profile,
        password: &str,
        tokens: &TokenPair,
    ) -> Result<LocalUser> {
        let password_hash = hash_password(password)?;

        let user = self
            .store
            .upsert_by_username(
                &profile.username,
                UserUpsert {
                    first_name: profile.first_name.clone(),
                    last_name: profile.last_name.clone(),
                    email: profile.email.clone(),
                    is_staff: profile.is_staff,
                    is_superuser: profile.is_superuser,
                    password_hash,
                    staff_view: profile.staff_view,
                    access_token: tokens.access_token.clone(),
                    refresh_token: tokens.refresh_token.clone(),
                },
            )
            .await?;

        tracing::info!(
            username = %user.username,
            is_staff = user.is_staff,
            "User record synced from OAuth profile"
        );
        Ok(user)
    }
}

#[async_trait]
impl<S: UserStore> AuthBackend for OAuthPasswordBackend<S> {
    async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        let tokens = match self.oauth.issue_tokens(username, password).await {
            Ok(tokens) => tokens,
            Err(AuthError::Token(reason)) => {
                // The authorization server would not issue tokens. The
                // credentials may still authenticate via another backend.
                tracing::debug!(username, reason = %reason, "Token issuance failed, not applicable");
                return Ok(AuthOutcome::NotApplicable);
            }
            Err(e) => return Err(e),
        };

        let profile = match self.profiles.fetch_profile(&tokens.access_token).await {
            Ok(profile) => profile,
            Err(AuthError::Profile(reason)) => {
                // Tokens were just issued, so the access token is valid; a
                // failing profile fetch means the integration itself is
                // broken. Deny outright.
                tracing::warn!(username, reason = %reason, "Profile fetch failed with a fresh token");
                return Ok(AuthOutcome::Denied(
                    "Failed to access user profile".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        let user = self.reconcile_user(&profile, password, &tokens).await?;
        Ok(AuthOutcome::Authenticated(user))
    }

    async fn get_user(&self, user_id: u64) -> Result<Option<LocalUser>> {
        self.store.find_by_id(user_id).await
    }
}

/// Ordered chain of backends tried in sequence.
///
/// Each backend is tried in turn; the chain moves on only when a backend
/// reports [`AuthOutcome::NotApplicable`], and stops on the first
/// `Authenticated` or `Denied`.
pub struct BackendChain {
    backends: Vec<Arc<dyn AuthBackend>>,
}

impl BackendChain {
    pub fn new(backends: Vec<Arc<dyn AuthBackend>>) -> Self {
        Self { backends }
    }

    /// Try each backend in order until one authenticates or denies.
    ///
    /// Returns `NotApplicable` if every backend passed: callers typically
    /// render that as plain "invalid credentials".
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        for backend in &self.backends {
            match backend.authenticate(username, password).await? {
                AuthOutcome::NotApplicable => continue,
                outcome => return Ok(outcome),
            }
        }
        Ok(AuthOutcome::NotApplicable)
    }

    /// Resolve a user ID through the chain.
    pub async fn get_user(&self, user_id: u64) -> Result<Option<LocalUser>> {
        for backend in &self.backends {
            if let Some(user) = backend.get_user(user_id).await? {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }
}
