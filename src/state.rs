// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use url::Url;

use crate::api::VaultApi;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::pages::{LoginPage, RegisterPage, VaultPage};
use crate::session::{SessionAccessor, SessionStore};
use crate::sync::SyncClient;
use crate::ui::Ui;

/// Shared handles the page controllers are built from.
#[derive(Clone)]
pub struct ClientState {
    pub api: VaultApi,
    pub session: SessionAccessor,
    pub ui: Arc<dyn Ui>,
    pub origin: Url,
    pub csrf_token: Option<String>,
}

impl ClientState {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
        ui: Arc<dyn Ui>,
    ) -> ClientResult<Self> {
        Ok(Self {
            api: VaultApi::from_config(config)?,
            session: SessionAccessor::new(store, ui.clone()),
            ui,
            origin: config.page_origin.clone(),
            csrf_token: config.csrf_token.clone(),
        })
    }

    pub fn vault_page(&self) -> VaultPage {
        VaultPage::new(
            SyncClient::new(self.api.clone(), self.session.clone()),
            self.ui.clone(),
        )
    }

    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(
            self.api.clone(),
            self.session.clone(),
            self.ui.clone(),
            self.origin.clone(),
        )
    }

    pub fn register_page(&self) -> RegisterPage {
        RegisterPage::new(
            self.api.clone(),
            self.ui.clone(),
            self.origin.clone(),
            self.csrf_token.clone(),
        )
    }
}
