// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! resolved [`ClientConfig`]. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `TRUSTBOX_PAGE_ORIGIN` | Origin the pages are served from | `http://localhost` |
//! | `TRUSTBOX_API_BASE_URL` | Explicit API base URL | Resolved from the origin |
//! | `TRUSTBOX_SESSION_FILE` | Session storage file | `.trustbox-session.json` |
//! | `TRUSTBOX_CSRF_TOKEN` | Token forwarded on registration | Unset |
//! | `TRUSTBOX_REQUEST_TIMEOUT_SECS` | Per-request timeout | `15` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Environment variable name for the page origin.
///
/// The origin decides both the API base URL and whether the connection gate
/// lets login and registration through.
pub const PAGE_ORIGIN_ENV: &str = "TRUSTBOX_PAGE_ORIGIN";

/// Environment variable name for an explicit API base URL.
pub const API_BASE_URL_ENV: &str = "TRUSTBOX_API_BASE_URL";

/// Environment variable name for the session storage file.
pub const SESSION_FILE_ENV: &str = "TRUSTBOX_SESSION_FILE";

/// Environment variable name for the registration CSRF token.
pub const CSRF_TOKEN_ENV: &str = "TRUSTBOX_CSRF_TOKEN";

/// Environment variable name for the request timeout in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "TRUSTBOX_REQUEST_TIMEOUT_SECS";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_PAGE_ORIGIN: &str = "http://localhost";
pub const DEFAULT_SESSION_FILE: &str = ".trustbox-session.json";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// API served next to a local development origin.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:3000";

/// Hosts treated as local development origins.
pub const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Delay before a failed session check sends the user to login.
pub const SESSION_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Delay before a successful login opens the vault.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Delay before a successful registration opens login.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub page_origin: Url,
    pub api_base_url: Url,
    pub session_file: PathBuf,
    pub csrf_token: Option<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Configuration for pages served from `origin`, all else defaulted.
    pub fn for_origin(origin: Url) -> ClientResult<Self> {
        let api_base_url = resolve_api_base(&origin)?;
        Ok(Self {
            page_origin: origin,
            api_base_url,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            csrf_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_format: LogFormat::default(),
        })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin_raw = lookup(PAGE_ORIGIN_ENV).unwrap_or_else(|| DEFAULT_PAGE_ORIGIN.to_string());
        let origin = parse_url(PAGE_ORIGIN_ENV, &origin_raw)?;
        let mut config = Self::for_origin(origin)?;

        if let Some(base) = lookup(API_BASE_URL_ENV) {
            config.api_base_url = parse_url(API_BASE_URL_ENV, &base)?;
        }
        if let Some(path) = lookup(SESSION_FILE_ENV) {
            config.session_file = PathBuf::from(path);
        }
        config.csrf_token = lookup(CSRF_TOKEN_ENV).filter(|token| !token.trim().is_empty());
        if let Some(secs) = lookup(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ClientError::Config(format!("{REQUEST_TIMEOUT_ENV} must be a whole number of seconds"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config.log_format = LogFormat::parse(&format);
        }

        Ok(config)
    }
}

fn parse_url(name: &str, value: &str) -> ClientResult<Url> {
    Url::parse(value.trim()).map_err(|e| ClientError::Config(format!("{name}: {e}")))
}

/// Whether the origin is a recognised local development host.
pub fn is_local_origin(origin: &Url) -> bool {
    origin
        .host_str()
        .is_some_and(|host| LOCAL_HOSTS.contains(&host))
}

/// API base URL for pages served from `origin`.
///
/// Local origins talk to the development API on port 3000; anything else
/// reaches the API under `/api` on the same scheme and host.
pub fn resolve_api_base(origin: &Url) -> ClientResult<Url> {
    if is_local_origin(origin) {
        return parse_url("local API", LOCAL_API_BASE_URL);
    }
    let host = origin
        .host_str()
        .ok_or_else(|| ClientError::Config(format!("origin {origin} has no host")))?;
    parse_url("API base", &format!("{}://{}/api", origin.scheme(), host))
}
