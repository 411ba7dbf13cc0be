// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Page controllers.
//!
//! Each controller owns its form state and drives the API, the session and
//! the [`Ui`](crate::ui::Ui) in response to user actions.

pub mod login;
pub mod register;
pub mod submit;
pub mod vault;

pub use login::LoginPage;
pub use register::RegisterPage;
pub use submit::SubmitControl;
pub use vault::VaultPage;
