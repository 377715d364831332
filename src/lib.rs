// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OCS-Auth: OAuth2 authentication adapter
//!
//! This crate bridges an application's local user records with a remote
//! OAuth2 authorization server. A login attempt exchanges the submitted
//! username/password for an access/refresh token pair (resource-owner
//! password grant), fetches the canonical user profile with the access
//! token, and syncs the local user record and its auth profile to match.

pub mod backends;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use backends::{AuthBackend, AuthOutcome, BackendChain, OAuthPasswordBackend};
pub use config::AuthConfig;
pub use db::{MemoryUserStore, UserStore, UserUpsert};
pub use error::{AuthError, Result};
pub use models::{AuthProfile, LocalUser};
pub use services::{OAuthClient, Profile, ProfileClient, TokenPair};
