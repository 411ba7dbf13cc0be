// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! TrustBox Client - Credential Vault Sync Client
//!
//! Typed client for the TrustBox credential vault. Pages validate input
//! locally, keep the logged-in user in a [`session::SessionStore`] and sync
//! credential records with the vault REST API.
//!
//! ## Modules
//!
//! - `api` - REST calls and response normalisation (reqwest)
//! - `config` - Environment configuration and API base URL resolution
//! - `pages` - Login, registration and vault page controllers
//! - `render` - Record groups and their controls
//! - `session` - Persisted session and its stores
//! - `sync` - Session-scoped record operations
//! - `validate` - Form validation and password strength

pub mod api;
pub mod config;
pub mod error;
pub mod html;
pub mod models;
pub mod pages;
pub mod render;
pub mod session;
pub mod state;
pub mod sync;
pub mod ui;
pub mod validate;

#[cfg(test)]
mod test_support;
