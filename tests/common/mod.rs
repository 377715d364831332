// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for the integration tests.
//!
//! The remote authorization server is doubled with wiremock; each test gets
//! a fresh mock server, a config pointing at it, and an in-memory store.

use std::sync::Arc;
use std::time::Duration;

use ocs_auth::{AuthConfig, MemoryUserStore, OAuthPasswordBackend};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/o/token/";
pub const PROFILE_PATH: &str = "/api/profile/";

/// Config pointing at the given mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> AuthConfig {
    AuthConfig {
        token_url: format!("{}{}", server.uri(), TOKEN_PATH),
        profile_url: format!("{}{}", server.uri(), PROFILE_PATH),
        client_id: "test_client_id".to_string(),
        client_secret: "test_client_secret".to_string(),
        request_timeout: Duration::from_secs(5),
    }
}

/// Backend wired to the mock server plus the store backing it.
#[allow(dead_code)]
pub fn test_backend(
    server: &MockServer,
) -> (OAuthPasswordBackend<MemoryUserStore>, Arc<MemoryUserStore>) {
    init_tracing();
    let store = Arc::new(MemoryUserStore::new());
    let backend = OAuthPasswordBackend::new(&test_config(server), store.clone());
    (backend, store)
}

/// Install a test subscriber so `RUST_LOG` surfaces adapter logs.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Token endpoint success body.
#[allow(dead_code)]
pub fn token_body(access_token: &str, refresh_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
    })
}

/// Profile endpoint success body for the canonical test user.
#[allow(dead_code)]
pub fn alice_profile_body() -> serde_json::Value {
    json!({
        "first_name": "Alice",
        "last_name": "Example",
        "username": "alice",
        "email": "alice@example.com",
        "is_staff": false,
        "profile": { "staff_view": false },
    })
}

/// Mount a token endpoint that issues the given pair.
#[allow(dead_code)]
pub async fn mock_token_success(server: &MockServer, access_token: &str, refresh_token: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body(access_token, refresh_token)),
        )
        .mount(server)
        .await;
}

/// Mount a token endpoint that rejects every request.
#[allow(dead_code)]
pub async fn mock_token_rejection(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(server)
        .await;
}

/// Mount a profile endpoint serving the given body to the given bearer.
#[allow(dead_code)]
pub async fn mock_profile_success(
    server: &MockServer,
    access_token: &str,
    body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(header("Authorization", format!("Bearer {access_token}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a profile endpoint that fails every request.
#[allow(dead_code)]
pub async fn mock_profile_failure(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
