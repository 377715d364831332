// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile fetcher for the authorization server's profile endpoint.

use serde::Deserialize;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::services::http_client;

/// Canonical user profile as served by the authorization server.
///
/// Fetched fresh on every authentication; the local user record is always
/// the projection of the most recently fetched profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub staff_view: bool,
}

/// Wire shape of the profile endpoint response.
///
/// The data contract with the server is assumed stable, but every required
/// field is still validated at parse time; a missing field is a profile
/// error, not a panic.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    is_staff: bool,
    profile: ProfileExtras,
}

#[derive(Debug, Deserialize)]
struct ProfileExtras {
    staff_view: bool,
}

impl From<ProfileResponse> for Profile {
    fn from(raw: ProfileResponse) -> Self {
        Self {
            first_name: raw.first_name,
            last_name: raw.last_name,
            username: raw.username,
            email: raw.email,
            is_staff: raw.is_staff,
            // TODO: the payload does not carry is_superuser yet; copying
            // is_staff is a known gap, not intended behavior. Fix once the
            // authorization server exposes the real value.
            is_superuser: raw.is_staff,
            staff_view: raw.profile.staff_view,
        }
    }
}

/// Client for the profile endpoint.
#[derive(Clone)]
pub struct ProfileClient {
    http: reqwest::Client,
    profile_url: String,
}

impl ProfileClient {
    /// Create a new client from the adapter configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http: http_client(config.request_timeout),
            profile_url: config.profile_url.clone(),
        }
    }

    /// Fetch the profile for the user the access token was issued to.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<Profile> {
        let response = self
            .http
            .get(&self.profile_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Profile(format!("Profile request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Profile(format!("HTTP {}: {}", status, body)));
        }

        let raw: ProfileResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Profile(format!("JSON parse error: {}", e)))?;

        Ok(raw.into())
    }
}
