// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Submit button state.

/// A form's submit control.
///
/// Disabled with a progress label while a request is in flight so the form
/// cannot be sent twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    idle_label: String,
    label: String,
    disabled: bool,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            idle_label: label.clone(),
            label,
            disabled: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn disable(&mut self, busy_label: &str) {
        self.disabled = true;
        self.label = busy_label.to_string();
    }

    /// Re-enable with the idle label.
    pub fn enable(&mut self) {
        self.disabled = false;
        self.label = self.idle_label.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disable_then_enable_restores_label() {
        let mut control = SubmitControl::new("Log in");
        control.disable("Logging in...");
        assert!(control.is_disabled());
        assert_eq!(control.label(), "Logging in...");

        control.enable();
        assert!(!control.is_disabled());
        assert_eq!(control.label(), "Log in");
    }
}
