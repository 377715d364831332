// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - remote calls against the authorization server.

pub mod oauth;
pub mod profile;

pub use oauth::{OAuthClient, TokenPair};
pub use profile::{Profile, ProfileClient};

use std::time::Duration;

/// Build a reqwest client with the configured per-request timeout.
///
/// Client construction only fails if the TLS backend cannot initialize,
/// which is unrecoverable at this level.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("HTTP client construction failed")
}
