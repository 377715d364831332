// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth2 client for the authorization server's token endpoint.
//!
//! Handles:
//! - Token issuance via the resource-owner password grant
//! - Token refresh
//!
//! Both calls are single-shot: one non-success response is a definitive
//! failure, with no retries.

use serde::Deserialize;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::services::http_client;

/// Access/refresh token pair issued by the authorization server.
///
/// Both strings are opaque bearer credentials; nothing in this crate parses
/// or validates them. The access token is short-lived, the refresh token
/// longer-lived.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Client for the token endpoint, holding the application's static OAuth
/// client credentials.
#[derive(Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl OAuthClient {
    /// Create a new client from the adapter configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http: http_client(config.request_timeout),
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Exchange a username/password for a token pair.
    pub async fn issue_tokens(&self, username: &str, password: &str) -> Result<TokenPair> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Token(format!("Token request failed: {}", e)))?;

        check_token_response(response).await
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Token(format!("Token refresh request failed: {}", e)))?;

        check_token_response(response).await
    }

    /// Revoke issued tokens.
    ///
    /// Not implemented. Access tokens are short-lived, and refresh tokens
    /// are never exposed to end users, so a compromised access token ages
    /// out quickly on its own.
    // TODO: implement revocation against the authorization server's revoke
    // endpoint once one is provisioned.
    pub async fn revoke_tokens(&self) -> Result<()> {
        Ok(())
    }
}

/// Check response status and parse the token pair.
async fn check_token_response(response: reqwest::Response) -> Result<TokenPair> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Token(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AuthError::Token(format!("JSON parse error: {}", e)))
}
