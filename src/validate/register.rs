// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration form validation.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::{assess_password, is_secure_connection, ValidationError};
use crate::html::sanitize_input;
use crate::models::RegisterRequest;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;

/// Longest accepted email address (RFC 5321).
pub const EMAIL_MAX: usize = 254;

/// Raw registration form contents.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub authorized_person: String,
    pub authorized_email: String,
    pub accepted_terms: bool,
}

impl RegistrationForm {
    /// Gate and validate the form, producing the request body.
    ///
    /// Text fields are trimmed and HTML-escaped before checking; passwords are
    /// used exactly as typed. The first failing check wins.
    pub fn validate(&self, origin: &Url) -> Result<RegisterRequest, ValidationError> {
        if !is_secure_connection(origin) {
            return Err(ValidationError::InsecureConnection);
        }

        let username = sanitize_input(&self.username);
        let email = sanitize_input(&self.email);
        let authorized_person = sanitize_input(&self.authorized_person);
        let authorized_email = sanitize_input(&self.authorized_email);

        let username_len = username.encode_utf16().count();
        if username_len < USERNAME_MIN {
            return Err(ValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if username_len > USERNAME_MAX {
            return Err(ValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_pattern().is_match(&username) {
            return Err(ValidationError::UsernameInvalidCharacters);
        }

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        if !assess_password(&self.password).is_strong() {
            return Err(ValidationError::WeakPassword);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        if !authorized_person.is_empty() && authorized_email.is_empty() {
            return Err(ValidationError::MissingAuthorizedEmail);
        }
        if !authorized_email.is_empty() && !is_valid_email(&authorized_email) {
            return Err(ValidationError::InvalidAuthorizedEmail);
        }

        if !self.accepted_terms {
            return Err(ValidationError::TermsNotAccepted);
        }

        Ok(RegisterRequest {
            username,
            email,
            password: self.password.clone(),
            authorized_person: non_empty(authorized_person),
            authorized_email: non_empty(authorized_email),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn username_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"))
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("valid regex")
    })
}

/// Bounded-length address check, a simplified RFC 5322 grammar.
pub fn is_valid_email(email: &str) -> bool {
    email.encode_utf16().count() <= EMAIL_MAX && email_pattern().is_match(email)
}
