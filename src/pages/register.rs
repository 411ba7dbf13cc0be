// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration page controller.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use super::SubmitControl;
use crate::api::VaultApi;
use crate::config::REGISTER_REDIRECT_DELAY;
use crate::error::{ClientError, ClientResult};
use crate::ui::{Notice, Page, Ui};
use crate::validate::{assess_password, RegistrationForm};

pub struct RegisterPage {
    api: VaultApi,
    ui: Arc<dyn Ui>,
    origin: Url,
    csrf_token: Option<String>,
    submit: SubmitControl,
}

impl RegisterPage {
    pub fn new(api: VaultApi, ui: Arc<dyn Ui>, origin: Url, csrf_token: Option<String>) -> Self {
        Self {
            api,
            ui,
            origin,
            csrf_token,
            submit: SubmitControl::new("Create account"),
        }
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    /// Strength-meter line for the password typed so far; `None` when empty.
    pub fn password_feedback(password: &str) -> Option<String> {
        if password.is_empty() {
            None
        } else {
            Some(assess_password(password).describe())
        }
    }

    /// Validate and register. Login opens after [`REGISTER_REDIRECT_DELAY`].
    pub async fn submit(&mut self, form: &RegistrationForm) -> ClientResult<()> {
        if self.submit.is_disabled() {
            debug!("registration submit rejected while a request is pending");
            return Err(ClientError::SubmitPending);
        }

        let request = form.validate(&self.origin).map_err(|e| {
            self.ui.notify(Notice::error(e.to_string()));
            ClientError::from(e)
        })?;

        self.submit.disable("Creating account...");
        match self.api.register(&request, self.csrf_token.as_deref()).await {
            Ok(()) => {
                self.ui.notify(Notice::success(
                    "Account created! Redirecting to login...",
                ));
                self.ui.redirect(Page::Login, REGISTER_REDIRECT_DELAY);
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    ClientError::Fetch { message, .. } => message.clone(),
                    _ => "An error occurred during registration. Check your connection and try again."
                        .to_string(),
                };
                self.ui.notify(Notice::error(message));
                self.submit.enable();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use super::*;
    use crate::test_support::{MockBackend, ScriptedResponse};
    use crate::ui::recording::RecordingUi;
    use crate::validate::ValidationError;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "Abc123!@".into(),
            confirm_password: "Abc123!@".into(),
            accepted_terms: true,
            ..Default::default()
        }
    }

    fn page(backend: &MockBackend, ui: &Arc<RecordingUi>, origin: &str) -> RegisterPage {
        RegisterPage::new(
            backend.api(),
            ui.clone(),
            Url::parse(origin).unwrap(),
            Some("csrf-123".into()),
        )
    }

    #[tokio::test]
    async fn successful_registration_redirects_to_login() {
        let backend = MockBackend::start().await;
        let ui = Arc::new(RecordingUi::default());
        let mut page = page(&backend, &ui, "https://vault.example.com");

        page.submit(&form()).await.unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.path, "/register");
        assert_eq!(request.csrf_token.as_deref(), Some("csrf-123"));
        assert_eq!(request.body["username"], "alice");
        assert_eq!(ui.redirects(), vec![(Page::Login, REGISTER_REDIRECT_DELAY)]);
    }

    #[tokio::test]
    async fn weak_password_never_reaches_server() {
        let backend = MockBackend::start().await;
        let ui = Arc::new(RecordingUi::default());
        let mut page = page(&backend, &ui, "https://vault.example.com");
        let mut weak = form();
        weak.password = "abc12345".into();
        weak.confirm_password = "abc12345".into();

        let err = page.submit(&weak).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::WeakPassword)
        ));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn insecure_origin_blocks_submission() {
        let backend = MockBackend::start().await;
        let ui = Arc::new(RecordingUi::default());
        let mut page = page(&backend, &ui, "http://vault.example.com");

        page.submit(&form()).await.unwrap_err();
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn server_rejection_is_prefixed_and_reenables() {
        let backend = MockBackend::start().await;
        backend.script(
            Method::POST,
            "/register",
            ScriptedResponse::text(StatusCode::BAD_GATEWAY, ""),
        );
        let ui = Arc::new(RecordingUi::default());
        let mut page = page(&backend, &ui, "https://vault.example.com");

        page.submit(&form()).await.unwrap_err();

        assert_eq!(
            ui.last_notice().unwrap(),
            Notice::error("Registration failed: Server error (status 502)")
        );
        assert!(!page.submit_control().is_disabled());
        assert!(ui.redirects().is_empty());
    }

    #[tokio::test]
    async fn resubmit_after_success_is_rejected_without_request() {
        let backend = MockBackend::start().await;
        let ui = Arc::new(RecordingUi::default());
        let mut page = page(&backend, &ui, "https://vault.example.com");
        page.submit(&form()).await.unwrap();

        let err = page.submit(&form()).await.unwrap_err();

        assert!(matches!(err, ClientError::SubmitPending));
        assert_eq!(backend.count(&Method::POST, "/register"), 1);
        assert_eq!(ui.redirects().len(), 1);
    }

    #[test]
    fn password_feedback_tracks_strength() {
        assert_eq!(RegisterPage::password_feedback(""), None);
        assert_eq!(
            RegisterPage::password_feedback("Abc123!@").as_deref(),
            Some("Strong password")
        );
        assert!(RegisterPage::password_feedback("abc12345")
            .unwrap()
            .starts_with("Medium password"));
    }
}
