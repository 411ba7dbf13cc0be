// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pre-flight checks for vault record writes.

use super::ValidationError;
use crate::models::RecordDraft;

/// A new record needs every field, including the password.
pub fn validate_create(draft: &RecordDraft) -> Result<(), ValidationError> {
    if draft.username.is_empty() || draft.password.is_empty() || draft.domain.is_empty() {
        return Err(ValidationError::IncompleteRecord);
    }
    Ok(())
}

/// An update needs username and domain; an empty password keeps the old one.
pub fn validate_update(draft: &RecordDraft) -> Result<(), ValidationError> {
    if draft.username.is_empty() || draft.domain.is_empty() {
        return Err(ValidationError::IncompleteUpdate);
    }
    Ok(())
}
