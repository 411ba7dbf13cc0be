// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Record rendering state.
//!
//! [`RecordRenderer`] owns the displayed groups and the local identifier
//! counter. Each redraw replaces the whole group list; there is no
//! incremental patching.
//!
//! New blank groups take `highest known id + 1`. The server assigns its own
//! primary keys and nothing reconciles the two, so a blank group may reuse an
//! identifier the server still holds for a record this page has not seen.

use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::html::group_fragment;
use crate::models::{CredentialRecord, GroupId, RecordDraft};

/// Control attached to every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAction {
    Save,
    Update,
    Remove,
}

impl GroupAction {
    pub const ALL: [GroupAction; 3] = [GroupAction::Save, GroupAction::Update, GroupAction::Remove];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupAction::Save => "save",
            GroupAction::Update => "update",
            GroupAction::Remove => "remove",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == value)
    }
}

/// A control bound to a specific group, handed to the page dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBinding {
    pub group_id: GroupId,
    pub action: GroupAction,
}

/// One editable credential group on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub draft: RecordDraft,
    /// Whether the group was drawn from a server record.
    pub persisted: bool,
}

impl Group {
    pub fn blank(id: GroupId) -> Self {
        Self {
            id,
            draft: RecordDraft::default(),
            persisted: false,
        }
    }

    pub fn from_record(record: CredentialRecord) -> Self {
        Self {
            id: record.group_id,
            draft: RecordDraft {
                username: record.username,
                password: record.password,
                domain: record.domain,
            },
            persisted: true,
        }
    }

    pub fn controls(&self) -> [ActionBinding; 3] {
        GroupAction::ALL.map(|action| ActionBinding {
            group_id: self.id,
            action,
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordRenderer {
    groups: Vec<Group>,
    highest_id: GroupId,
}

impl RecordRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every group and reset the identifier counter.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.highest_id = GroupId::default();
    }

    /// Replace the display with one group per record, in the order received.
    ///
    /// An empty list draws a single blank group.
    pub fn render(&mut self, records: Vec<CredentialRecord>) {
        self.clear();
        for record in records {
            self.highest_id = self.highest_id.max(record.group_id);
            self.groups.push(Group::from_record(record));
        }
        if self.groups.is_empty() {
            self.draw_blank();
        }
        debug!(groups = self.groups.len(), highest_id = %self.highest_id, "rendered records");
    }

    /// Replace the display with a single blank group numbered
    /// [`GroupId::FIRST`].
    pub fn draw_blank(&mut self) -> GroupId {
        self.clear();
        self.highest_id = GroupId::FIRST;
        self.groups.push(Group::blank(GroupId::FIRST));
        GroupId::FIRST
    }

    /// Append a blank group numbered one past the highest known identifier.
    ///
    /// Fails when the server already holds `u64::MAX`.
    pub fn add_group(&mut self) -> ClientResult<GroupId> {
        let id = self.next_group_id().ok_or(ClientError::GroupIdsExhausted(self.highest_id))?;
        self.highest_id = id;
        self.groups.push(Group::blank(id));
        Ok(id)
    }

    /// Identifier the next [`add_group`](Self::add_group) call will use.
    pub fn next_group_id(&self) -> Option<GroupId> {
        self.highest_id.next()
    }

    pub fn remove_group(&mut self, id: GroupId) -> Option<Group> {
        let index = self.groups.iter().position(|group| group.id == id)?;
        Some(self.groups.remove(index))
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    /// Every control currently on screen.
    pub fn bindings(&self) -> Vec<ActionBinding> {
        self.groups.iter().flat_map(Group::controls).collect()
    }

    /// The whole display as an HTML fragment.
    pub fn to_html(&self) -> String {
        self.groups.iter().map(group_fragment).collect()
    }
}
