// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Adapter configuration, constructed explicitly and passed into each
//! component at build time.
//!
//! Nothing in the crate reads ambient process state after construction, so
//! tests can point a backend at fake endpoints with short timeouts.

use std::env;
use std::time::Duration;

/// Per-request timeout applied to each outbound call when
/// `REQUESTS_TIMEOUT_SECONDS` is not set.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the OAuth authentication adapter.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token endpoint of the authorization server.
    pub token_url: String,
    /// Profile endpoint of the authorization server.
    pub profile_url: String,
    /// Static OAuth client ID for this application.
    pub client_id: String,
    /// Static OAuth client secret for this application.
    pub client_secret: String,
    /// Timeout applied independently to each outbound request, so a hung
    /// authorization server cannot block a login attempt indefinitely.
    pub request_timeout: Duration,
}

impl Default for AuthConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            token_url: "http://localhost:8000/o/token/".to_string(),
            profile_url: "http://localhost:8000/api/profile/".to_string(),
            client_id: "test_client_id".to_string(),
            client_secret: "test_client_secret".to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `OAUTH_TOKEN_URL`, `OAUTH_PROFILE_URL`,
    /// `OAUTH_CLIENT_ID`, `OAUTH_CLIENT_SECRET` and
    /// `REQUESTS_TIMEOUT_SECONDS` (optional, default 10).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            token_url: env::var("OAUTH_TOKEN_URL")
                .map_err(|_| ConfigError::Missing("OAUTH_TOKEN_URL"))?,
            profile_url: env::var("OAUTH_PROFILE_URL")
                .map_err(|_| ConfigError::Missing("OAUTH_PROFILE_URL"))?,
            client_id: env::var("OAUTH_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("OAUTH_CLIENT_ID"))?,
            client_secret: env::var("OAUTH_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("OAUTH_CLIENT_SECRET"))?,
            request_timeout: Duration::from_secs(
                env::var("REQUESTS_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        })
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
