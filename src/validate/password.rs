// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Four-factor password strength heuristic.

/// Minimum length before any factor is counted.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that count as the "special" factor.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak { hint: &'static str },
    Medium { hint: &'static str },
    Strong,
}

impl PasswordStrength {
    pub fn is_strong(&self) -> bool {
        matches!(self, PasswordStrength::Strong)
    }

    /// Feedback line for a strength meter.
    pub fn describe(&self) -> String {
        match self {
            PasswordStrength::Weak { hint } => format!("Weak password: {hint}"),
            PasswordStrength::Medium { hint } => format!("Medium password: {hint}"),
            PasswordStrength::Strong => "Strong password".to_string(),
        }
    }
}

/// Score `password` on uppercase, lowercase, digit and special characters.
///
/// Length is counted in UTF-16 units, as browsers count form input.
/// Anything shorter than [`MIN_PASSWORD_LENGTH`] is weak; otherwise fewer than
/// two factors is weak, two or three is medium, all four is strong.
pub fn assess_password(password: &str) -> PasswordStrength {
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return PasswordStrength::Weak {
            hint: "at least 8 characters required",
        };
    }

    let factors = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    match factors {
        0 | 1 => PasswordStrength::Weak {
            hint: "add uppercase letters, digits or special characters",
        },
        2 | 3 => PasswordStrength::Medium {
            hint: "add more variety for better security",
        },
        _ => PasswordStrength::Strong,
    }
}
