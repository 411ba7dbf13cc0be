// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Secure-connection gate for credential forms.

use url::Url;

use crate::config::is_local_origin;

/// Whether credentials may be submitted from a page served at `origin`.
///
/// HTTPS is always accepted; plain HTTP only from a local development host.
pub fn is_secure_connection(origin: &Url) -> bool {
    origin.scheme() == "https" || is_local_origin(origin)
}
