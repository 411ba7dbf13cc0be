// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Response normalization.
//!
//! Turns a `(status, content type, body)` triple into an [`Ack`] or a
//! [`ClientError`] with a user-facing message. Every function here is pure,
//! so each policy yields the same message for the same input.

use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::models::{Ack, RemoveOutcome};

/// Write operation named in fallback error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Update,
    Remove,
}

impl Operation {
    /// Gerund used inside messages ("while saving").
    pub fn gerund(&self) -> &'static str {
        match self {
            Operation::Save => "saving",
            Operation::Update => "updating",
            Operation::Remove => "removing",
        }
    }
}

/// Raw HTTP outcome, detached from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn declares_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn message_field(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Policy for create and update.
///
/// Success yields the parsed JSON body, or an empty ack when the body is not
/// JSON. Failure prefers a `message` field from a JSON body; a JSON body
/// without one gets a generic message, and a non-JSON body is classified by
/// status class.
pub fn normalize_write(response: &RawResponse, operation: Operation) -> ClientResult<Ack> {
    if response.is_success() {
        return Ok(Ack(response.json()));
    }

    let status = response.status;
    let message = match response.json() {
        Some(body) => message_field(&body).unwrap_or_else(|| {
            format!("Unknown server error ({status}) while {}.", operation.gerund())
        }),
        None if status >= 500 => format!(
            "Server error {status}: could not process the response. Check that the server is running correctly."
        ),
        None if status >= 400 => {
            format!("Client error {status}: the request could not be processed.")
        }
        None => format!("Unexpected error ({status}): could not process the response."),
    };
    Err(ClientError::fetch(status, message))
}

/// Policy for delete: 404 is a soft success, any other failure is hard.
pub fn normalize_remove(response: &RawResponse) -> ClientResult<RemoveOutcome> {
    if response.status == 404 {
        return Ok(RemoveOutcome::AlreadyAbsent);
    }
    if !response.is_success() {
        return Err(ClientError::fetch(
            response.status,
            format!("Server error: status {}", response.status),
        ));
    }
    Ok(RemoveOutcome::Deleted(response.text()))
}

/// Policy for the record list: any failure carries only its status.
pub fn fetch_failure(status: u16) -> ClientError {
    ClientError::fetch(
        status,
        format!("Could not fetch data from the server (status {status})."),
    )
}

/// Policy for a rejected login, keyed on the declared content type.
pub fn login_failure(response: &RawResponse) -> ClientError {
    let message = if response.declares_json() {
        response
            .json()
            .as_ref()
            .and_then(message_field)
            .unwrap_or_else(|| "Login failed. Please try again.".to_string())
    } else {
        non_empty_text(response).unwrap_or_else(|| "Login failed. Check your credentials.".to_string())
    };
    ClientError::fetch(response.status, message)
}

/// Policy for a rejected registration, keyed on the declared content type.
pub fn register_failure(response: &RawResponse) -> ClientError {
    let detail = if response.declares_json() {
        response
            .json()
            .as_ref()
            .and_then(message_field)
            .unwrap_or_else(|| "Unknown error".to_string())
    } else {
        non_empty_text(response)
            .unwrap_or_else(|| format!("Server error (status {})", response.status))
    };
    ClientError::fetch(response.status, format!("Registration failed: {detail}"))
}

fn non_empty_text(response: &RawResponse) -> Option<String> {
    let text = response.text();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
