// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the local side of the adapter.

pub mod user;

pub use user::{AuthProfile, LocalUser};
