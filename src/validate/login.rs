// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login form validation.

use url::Url;

use super::{is_secure_connection, ValidationError};
use crate::models::LoginRequest;

/// Raw login form contents.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Gate and validate the form, producing the request body.
    ///
    /// Only presence is checked; the email is trimmed, the password is not.
    pub fn validate(&self, origin: &Url) -> Result<LoginRequest, ValidationError> {
        if !is_secure_connection(origin) {
            return Err(ValidationError::InsecureConnection);
        }

        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }

        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
