// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client error taxonomy.
//!
//! Every failure a page operation can hit maps to one [`ClientError`]
//! variant. `Display` is the text shown to the user, so variants that wrap a
//! server message print it unchanged.

use crate::models::GroupId;
use crate::validate::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Local pre-flight check failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No persisted user session.
    #[error("no user session")]
    NoSession,

    /// A persisted session exists but cannot be parsed.
    #[error("invalid user session: {0}")]
    InvalidSession(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Fetch { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout).
    #[error("cannot reach the server: {0}")]
    Network(String),

    /// A success response whose body does not have the expected shape.
    #[error("invalid server response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session storage error: {0}")]
    Storage(String),

    /// An action referenced a group that is not currently displayed.
    #[error("group {0} is not displayed")]
    UnknownGroup(GroupId),

    /// The highest known group id has no successor.
    #[error("no group identifier follows {0}")]
    GroupIdsExhausted(GroupId),

    /// The form already has a request in flight, or has completed and is
    /// waiting to navigate away.
    #[error("a submission is already in progress")]
    SubmitPending,

    /// reqwest rejected the request before sending it, e.g. an invalid
    /// header value.
    #[error("request could not be built: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn fetch(status: u16, message: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            message: message.into(),
        }
    }

    /// Session failures lock the page; everything else leaves it interactive.
    pub fn is_session_failure(&self) -> bool {
        matches!(self, Self::NoSession | Self::InvalidSession(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ClientError::InvalidRequest(e.to_string())
        } else if e.is_connect() || e.is_timeout() || e.is_request() {
            ClientError::Network(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::fetch(status.as_u16(), e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse(e.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
