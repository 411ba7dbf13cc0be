// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Vault page controller.
//!
//! Wires the renderer's group controls to the sync client. Every successful
//! save, update or remove is followed by a full reload; nothing is patched
//! optimistically.

use std::sync::Arc;

use tracing::warn;

use crate::api::Operation;
use crate::error::{ClientError, ClientResult};
use crate::models::{GroupId, RecordDraft, RemoveOutcome};
use crate::render::{ActionBinding, GroupAction, RecordRenderer};
use crate::sync::SyncClient;
use crate::ui::{Notice, Ui};

pub struct VaultPage {
    sync: SyncClient,
    renderer: RecordRenderer,
    ui: Arc<dyn Ui>,
}

impl VaultPage {
    pub fn new(sync: SyncClient, ui: Arc<dyn Ui>) -> Self {
        Self {
            sync,
            renderer: RecordRenderer::new(),
            ui,
        }
    }

    pub fn renderer(&self) -> &RecordRenderer {
        &self.renderer
    }

    /// Replace the field values of a displayed group.
    pub fn edit(&mut self, id: GroupId, draft: RecordDraft) -> ClientResult<()> {
        let group = self
            .renderer
            .group_mut(id)
            .ok_or(ClientError::UnknownGroup(id))?;
        group.draft = draft;
        Ok(())
    }

    /// Append a blank group. Tells the user when no identifier is left.
    pub fn add_group(&mut self) -> ClientResult<GroupId> {
        self.renderer.add_group().map_err(|e| {
            self.ui.notify(Notice::error(format!("Cannot add a group: {e}.")));
            e
        })
    }

    /// Fetch every record and redraw.
    ///
    /// On a fetch failure the user is told and a single blank group is drawn.
    /// Session failures leave the display empty.
    pub async fn load(&mut self) -> ClientResult<()> {
        self.renderer.clear();
        match self.sync.fetch_all().await {
            Ok(records) => {
                self.renderer.render(records);
                Ok(())
            }
            Err(e) if e.is_session_failure() => Err(e),
            Err(e) => {
                self.ui.notify(Notice::error(format!(
                    "Loading data failed: {}. A new group is shown instead.",
                    failure_detail(&e)
                )));
                self.renderer.draw_blank();
                Err(e)
            }
        }
    }

    /// Run the action behind a group control.
    pub async fn dispatch(&mut self, binding: ActionBinding) -> ClientResult<()> {
        match binding.action {
            GroupAction::Save => self.save_group(binding.group_id).await,
            GroupAction::Update => self.update_group(binding.group_id).await,
            GroupAction::Remove => self.remove_group(binding.group_id).await,
        }
    }

    /// Insert the group as a new record.
    pub async fn save_group(&mut self, id: GroupId) -> ClientResult<()> {
        let draft = self.displayed_draft(id, "Cannot find the group to save.")?;
        match self.sync.create(id, draft).await {
            Ok(_) => {
                self.ui.notify(Notice::success("Record saved."));
                self.load().await
            }
            Err(e) => Err(self.surface(Operation::Save, e)),
        }
    }

    /// Update the record behind the group.
    pub async fn update_group(&mut self, id: GroupId) -> ClientResult<()> {
        let draft = self.displayed_draft(id, "Cannot find the group to update.")?;
        match self.sync.update(id, &draft).await {
            Ok(_) => {
                let password = if draft.keeps_password() {
                    "unchanged"
                } else {
                    "re-encrypted"
                };
                self.ui.notify(Notice::success(format!(
                    "Record updated. Password is {password}."
                )));
                self.load().await
            }
            Err(e) => Err(self.surface(Operation::Update, e)),
        }
    }

    /// Delete the record and drop its group.
    ///
    /// A record the server no longer has still loses its group, with a
    /// warning. Any other failure keeps local state and reloads from the
    /// server.
    pub async fn remove_group(&mut self, id: GroupId) -> ClientResult<()> {
        match self.sync.remove(id).await {
            Ok(RemoveOutcome::Deleted(_)) => {
                self.renderer.remove_group(id);
                self.ui.notify(Notice::success(
                    "Record removed from the database and the screen.",
                ));
                self.load().await
            }
            Ok(RemoveOutcome::AlreadyAbsent) => {
                self.renderer.remove_group(id);
                self.ui.notify(Notice::warning(
                    "Record was not in the database, but the group was removed.",
                ));
                self.load().await
            }
            Err(e) => {
                let e = self.surface(Operation::Remove, e);
                if !e.is_session_failure() {
                    if let Err(reload) = self.load().await {
                        warn!(error = %reload, "reload after failed remove also failed");
                    }
                }
                Err(e)
            }
        }
    }

    fn displayed_draft(&self, id: GroupId, missing: &str) -> ClientResult<RecordDraft> {
        match self.renderer.group(id) {
            Some(group) => Ok(group.draft.clone()),
            None => {
                self.ui.notify(Notice::error(missing));
                Err(ClientError::UnknownGroup(id))
            }
        }
    }

    /// Tell the user about a failed write. Session failures were already
    /// reported by the accessor.
    fn surface(&self, operation: Operation, error: ClientError) -> ClientError {
        match &error {
            e if e.is_session_failure() => {}
            ClientError::Validation(v) if v.is_warning() => {
                self.ui.notify(Notice::warning(v.to_string()))
            }
            ClientError::Validation(v) => self.ui.notify(Notice::error(v.to_string())),
            e => self.ui.notify(Notice::error(format!(
                "{} failed: {}",
                operation_title(operation),
                failure_detail(e)
            ))),
        }
        error
    }
}

fn operation_title(operation: Operation) -> &'static str {
    match operation {
        Operation::Save => "Save",
        Operation::Update => "Update",
        Operation::Remove => "Remove",
    }
}

fn failure_detail(error: &ClientError) -> String {
    if error.is_network() {
        "cannot reach the server. Check that it is running".to_string()
    } else {
        error.to_string()
    }
}
