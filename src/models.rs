// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wire Models
//!
//! Request and response types exchanged with the vault REST API, plus the
//! user blob persisted in session storage. Field names follow the server's
//! JSON exactly: vault records use `PascalCase`, auth payloads `camelCase`.
//!
//! ## Model Categories
//!
//! - **Session**: [`User`] and its [`UserId`]
//! - **Vault records**: [`CredentialRecord`], [`RecordDraft`], [`GroupId`]
//! - **Auth forms**: [`LoginRequest`], [`LoginResponse`], [`RegisterRequest`]
//! - **Outcomes**: [`Ack`], [`RemoveOutcome`]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Session Models
// =============================================================================

/// Server-assigned user identifier.
///
/// The login endpoint may hand out numeric or string ids; both are forwarded
/// verbatim in the `x-user-id` header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Numeric(u64),
    Text(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{id}"),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        UserId::Numeric(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId::Text(value.to_string())
    }
}

/// The logged-in user as returned by `/login`.
///
/// Only `userId` is interpreted; every other profile field is carried along
/// untouched so the stored blob round-trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            profile: Map::new(),
        }
    }

    /// Value sent in the `x-user-id` header.
    pub fn header_value(&self) -> String {
        self.user_id.to_string()
    }
}

// =============================================================================
// Vault Record Models
// =============================================================================

/// Sequential identifier of a credential group.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl GroupId {
    /// Identifier of the first group drawn on an empty display.
    pub const FIRST: GroupId = GroupId(1);

    /// The following identifier, or `None` past `u64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(GroupId)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GroupId {
    fn from(value: u64) -> Self {
        GroupId(value)
    }
}

/// One stored username/password/domain triple.
///
/// Passwords arrive decrypted from `/getData`; the server re-encrypts on
/// write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialRecord {
    pub group_id: GroupId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub domain: String,
}

impl CredentialRecord {
    pub fn new(group_id: GroupId, draft: RecordDraft) -> Self {
        Self {
            group_id,
            username: draft.username,
            password: draft.password,
            domain: draft.domain,
        }
    }
}

/// Editable field values of a group, without its identifier.
///
/// This is also the `PUT /data/:id` body. An empty password on update means
/// "leave unchanged".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct RecordDraft {
    pub username: String,
    pub password: String,
    pub domain: String,
}

impl RecordDraft {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            domain: domain.into(),
        }
    }

    /// Whether an update with this draft keeps the stored password.
    pub fn keeps_password(&self) -> bool {
        self.password.trim().is_empty()
    }
}

// =============================================================================
// Auth Form Models
// =============================================================================

/// `POST /login` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /login` success body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
}

/// `POST /register` body.
///
/// Optional fields serialize as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub authorized_person: Option<String>,
    pub authorized_email: Option<String>,
}

// =============================================================================
// Outcome Models
// =============================================================================

/// Generic success acknowledgment; the body may be empty or non-JSON.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ack(pub Option<Value>);

impl Ack {
    pub fn empty() -> Self {
        Ack(None)
    }

    pub fn body(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Result of `DELETE /data/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The server deleted the record; carries the response text.
    Deleted(String),
    /// The server had no such record (404). Treated as a soft success.
    AlreadyAbsent,
}
