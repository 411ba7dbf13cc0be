// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Form Validation
//!
//! Pure input gating for the login, registration and vault forms. Nothing in
//! this module touches the network: a failed check aborts submission before
//! any request is built.
//!
//! - `transport` - secure-connection gate
//! - `password` - password strength heuristic
//! - `login` - login form
//! - `register` - registration form
//! - `record` - vault record create/update pre-flight

pub mod login;
pub mod password;
pub mod record;
pub mod register;
pub mod transport;

pub use login::LoginForm;
pub use password::{assess_password, PasswordStrength};
pub use record::{validate_create, validate_update};
pub use register::RegistrationForm;
pub use transport::is_secure_connection;

/// A failed local check. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Submission blocked: this page must be served over HTTPS.")]
    InsecureConnection,

    #[error("Enter both an email address and a password.")]
    MissingCredentials,

    #[error("Username must be at least {min} characters long.")]
    UsernameTooShort { min: usize },

    #[error("Username may be at most {max} characters long.")]
    UsernameTooLong { max: usize },

    #[error("Username may only contain letters, digits, underscores and hyphens.")]
    UsernameInvalidCharacters,

    #[error("Enter a valid email address.")]
    InvalidEmail,

    #[error(
        "Password must be strong. Use at least 8 characters with uppercase and lowercase letters, digits and special characters."
    )]
    WeakPassword,

    #[error("Passwords do not match. Please try again.")]
    PasswordMismatch,

    #[error("Enter an email address for the authorized person.")]
    MissingAuthorizedEmail,

    #[error("Enter a valid email address for the authorized person.")]
    InvalidAuthorizedEmail,

    #[error("Accept the terms and conditions and the privacy policy.")]
    TermsNotAccepted,

    #[error("Fill in all fields before saving. A password is required for new records.")]
    IncompleteRecord,

    #[error("Username and domain are required for updates.")]
    IncompleteUpdate,
}

impl ValidationError {
    /// Vault record checks are soft warnings; form checks are errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::IncompleteRecord | Self::IncompleteUpdate)
    }
}
