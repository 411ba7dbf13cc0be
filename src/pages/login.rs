// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login page controller.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use super::SubmitControl;
use crate::api::VaultApi;
use crate::config::LOGIN_REDIRECT_DELAY;
use crate::error::{ClientError, ClientResult};
use crate::models::{LoginRequest, User};
use crate::session::SessionAccessor;
use crate::ui::{Notice, Page, Ui};
use crate::validate::LoginForm;

pub struct LoginPage {
    api: VaultApi,
    session: SessionAccessor,
    ui: Arc<dyn Ui>,
    origin: Url,
    submit: SubmitControl,
}

impl LoginPage {
    pub fn new(api: VaultApi, session: SessionAccessor, ui: Arc<dyn Ui>, origin: Url) -> Self {
        Self {
            api,
            session,
            ui,
            origin,
            submit: SubmitControl::new("Log in"),
        }
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    /// Validate, log in and persist the session.
    ///
    /// On success the submit control stays disabled and the vault opens after
    /// [`LOGIN_REDIRECT_DELAY`]. Any failure re-enables it.
    pub async fn submit(&mut self, form: &LoginForm) -> ClientResult<()> {
        if self.submit.is_disabled() {
            debug!("login submit rejected while a request is pending");
            return Err(ClientError::SubmitPending);
        }

        let request = form.validate(&self.origin).map_err(|e| {
            self.ui.notify(Notice::error(e.to_string()));
            ClientError::from(e)
        })?;

        self.submit.disable("Logging in...");
        match self.exchange(&request).await {
            Ok(_) => {
                self.ui.notify(Notice::success("Login successful! Redirecting..."));
                self.ui.redirect(Page::Vault, LOGIN_REDIRECT_DELAY);
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    ClientError::Fetch { message, .. } => message.clone(),
                    _ => "An error occurred while logging in. Check your connection and try again."
                        .to_string(),
                };
                self.ui.notify(Notice::error(message));
                self.submit.enable();
                Err(e)
            }
        }
    }

    async fn exchange(&self, request: &LoginRequest) -> ClientResult<User> {
        let user = self.api.login(request).await?;
        self.session.persist(&user)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::session::MemorySessionStore;
    use crate::test_support::{MockBackend, ScriptedResponse};
    use crate::ui::recording::RecordingUi;
    use crate::ui::NoticeLevel;
    use crate::validate::ValidationError;

    struct Harness {
        backend: MockBackend,
        ui: Arc<RecordingUi>,
        session: SessionAccessor,
        page: LoginPage,
    }

    async fn harness(origin: &str) -> Harness {
        let backend = MockBackend::start().await;
        let ui = Arc::new(RecordingUi::default());
        let session = SessionAccessor::new(Arc::new(MemorySessionStore::new()), ui.clone());
        let page = LoginPage::new(
            backend.api(),
            session.clone(),
            ui.clone(),
            Url::parse(origin).unwrap(),
        );
        Harness {
            backend,
            ui,
            session,
            page,
        }
    }

    #[tokio::test]
    async fn successful_login_persists_session_and_redirects() {
        let mut h = harness("https://vault.example.com").await;

        h.page
            .submit(&LoginForm::new(MockBackend::EMAIL, MockBackend::PASSWORD))
            .await
            .unwrap();

        assert_eq!(h.session.current_user().unwrap().header_value(), "7");
        assert!(h.session.is_flagged_logged_in());
        assert_eq!(h.ui.redirects(), vec![(Page::Vault, LOGIN_REDIRECT_DELAY)]);
        assert!(h.page.submit_control().is_disabled());
    }

    #[tokio::test]
    async fn insecure_origin_blocks_before_any_request() {
        let mut h = harness("http://vault.example.com").await;

        let err = h
            .page
            .submit(&LoginForm::new(MockBackend::EMAIL, MockBackend::PASSWORD))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::InsecureConnection)
        ));
        assert!(h.backend.requests().is_empty());
        assert!(!h.page.submit_control().is_disabled());
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_locally() {
        let mut h = harness("http://localhost:5500").await;

        h.page.submit(&LoginForm::new("", "")).await.unwrap_err();

        assert!(h.backend.requests().is_empty());
        assert_eq!(
            h.ui.last_notice().unwrap().message,
            ValidationError::MissingCredentials.to_string()
        );
    }

    #[tokio::test]
    async fn rejected_login_shows_server_message_and_reenables() {
        let mut h = harness("https://vault.example.com").await;

        let err = h
            .page
            .submit(&LoginForm::new(MockBackend::EMAIL, "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(
            h.ui.last_notice().unwrap(),
            Notice::error("Invalid email or password")
        );
        assert!(!h.page.submit_control().is_disabled());
        assert_eq!(h.page.submit_control().label(), "Log in");
        assert_eq!(h.backend.count(&Method::POST, "/login"), 1);
    }

    #[tokio::test]
    async fn unreachable_server_gets_generic_message() {
        let ui = Arc::new(RecordingUi::default());
        let session = SessionAccessor::new(Arc::new(MemorySessionStore::new()), ui.clone());
        let mut page = LoginPage::new(
            MockBackend::unreachable_api().await,
            session,
            ui.clone(),
            Url::parse("http://127.0.0.1").unwrap(),
        );

        let err = page
            .submit(&LoginForm::new(MockBackend::EMAIL, MockBackend::PASSWORD))
            .await
            .unwrap_err();

        assert!(err.is_network());
        let notice = ui.last_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("An error occurred while logging in"));
        assert!(!page.submit_control().is_disabled());
    }

    #[tokio::test]
    async fn resubmit_after_success_is_rejected_without_request() {
        let mut h = harness("https://vault.example.com").await;
        h.page
            .submit(&LoginForm::new(MockBackend::EMAIL, MockBackend::PASSWORD))
            .await
            .unwrap();

        let err = h
            .page
            .submit(&LoginForm::new("other@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::SubmitPending));
        assert_eq!(h.backend.count(&Method::POST, "/login"), 1);
        assert_eq!(h.ui.notices().len(), 1);
        assert_eq!(h.session.current_user().unwrap().header_value(), "7");
    }

    #[tokio::test]
    async fn slow_server_times_out_and_reenables() {
        let backend = MockBackend::start().await;
        backend.script(
            Method::POST,
            "/login",
            ScriptedResponse::json(StatusCode::OK, json!({"user": {"userId": 7}}))
                .delayed(Duration::from_secs(2)),
        );
        let ui = Arc::new(RecordingUi::default());
        let session = SessionAccessor::new(Arc::new(MemorySessionStore::new()), ui.clone());
        let mut page = LoginPage::new(
            backend.api_with_timeout(Duration::from_millis(200)),
            session.clone(),
            ui.clone(),
            Url::parse("https://vault.example.com").unwrap(),
        );

        let err = page
            .submit(&LoginForm::new(MockBackend::EMAIL, MockBackend::PASSWORD))
            .await
            .unwrap_err();

        assert!(err.is_network());
        assert!(!page.submit_control().is_disabled());
        assert!(ui
            .last_notice()
            .unwrap()
            .message
            .starts_with("An error occurred while logging in"));
        assert!(!session.is_flagged_logged_in());
    }
}
