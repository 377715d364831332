// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error taxonomy for the authentication workflow.

/// Errors raised while authenticating against the authorization server and
/// syncing the local user record.
///
/// The orchestrator treats the variants very differently: a [`Token`] error
/// during issuance means "not authenticated by this backend" (another
/// backend in the chain may still know the user), a [`Profile`] error after
/// tokens were issued is a definitive denial, and a [`Store`] error is fatal
/// to the attempt.
///
/// [`Token`]: AuthError::Token
/// [`Profile`]: AuthError::Profile
/// [`Store`]: AuthError::Store
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The authorization server rejected the credentials, was unreachable,
    /// or timed out while issuing or refreshing tokens.
    #[error("OAuth token error: {0}")]
    Token(String),

    /// The profile endpoint returned a non-success status, a malformed
    /// body, or timed out.
    #[error("Profile fetch error: {0}")]
    Profile(String),

    /// The user store failed to commit the reconciliation write.
    #[error("User store error: {0}")]
    Store(String),

    /// Hashing the submitted password failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Anything else. External [`UserStore`](crate::db::UserStore)
    /// implementations use this for causes the taxonomy does not cover.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
