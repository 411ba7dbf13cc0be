// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session-scoped record synchronisation.
//!
//! Every operation first resolves the current user (aborting with a session
//! error when there is none), then runs the local pre-flight check, and only
//! then talks to the server. A failed check never reaches the network.

use crate::api::VaultApi;
use crate::error::ClientResult;
use crate::models::{Ack, CredentialRecord, GroupId, RecordDraft, RemoveOutcome};
use crate::session::SessionAccessor;
use crate::validate::{validate_create, validate_update};

#[derive(Clone)]
pub struct SyncClient {
    api: VaultApi,
    session: SessionAccessor,
}

impl SyncClient {
    pub fn new(api: VaultApi, session: SessionAccessor) -> Self {
        Self { api, session }
    }

    pub fn api(&self) -> &VaultApi {
        &self.api
    }

    pub fn session(&self) -> &SessionAccessor {
        &self.session
    }

    /// All records of the current user, in server order.
    pub async fn fetch_all(&self) -> ClientResult<Vec<CredentialRecord>> {
        let user = self.session.current_user()?;
        self.api.fetch_all(&user).await
    }

    /// Insert a record. Username, password and domain are all required.
    pub async fn create(&self, id: GroupId, draft: RecordDraft) -> ClientResult<Ack> {
        let user = self.session.current_user()?;
        validate_create(&draft)?;
        self.api.create(&user, &CredentialRecord::new(id, draft)).await
    }

    /// Update a record. An empty password leaves the stored one unchanged.
    pub async fn update(&self, id: GroupId, draft: &RecordDraft) -> ClientResult<Ack> {
        let user = self.session.current_user()?;
        validate_update(draft)?;
        self.api.update(&user, id, draft).await
    }

    /// Delete a record; a record already gone on the server is not an error.
    pub async fn remove(&self, id: GroupId) -> ClientResult<RemoveOutcome> {
        let user = self.session.current_user()?;
        self.api.remove(&user, id).await
    }
}
