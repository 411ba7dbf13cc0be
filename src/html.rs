// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTML escaping and group fragments.
//!
//! Group controls carry `data-action` and `data-group` attributes; the host
//! maps a click back to an [`ActionBinding`](crate::render::ActionBinding)
//! instead of evaluating a global handler name.

use crate::render::{Group, GroupAction};

/// Escape text for an HTML text node, as a browser serializes `textContent`.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape text for a double-quoted attribute value.
pub fn escape_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Trim and escape free-text form input before validation.
pub fn sanitize_input(input: &str) -> String {
    escape_text(input.trim())
}

/// Render one editable group with its save/update/remove controls.
pub fn group_fragment(group: &Group) -> String {
    let id = group.id;
    let mut lines = vec![
        format!(r#"<div class="field-group" id="group-{id}">"#),
        format!(r#"  <div class="input-container" id="input-container-{id}">"#),
    ];
    for (field, label, value) in [
        ("username", "Username", &group.draft.username),
        ("password", "Password", &group.draft.password),
        ("domain", "Domain", &group.draft.domain),
    ] {
        lines.push(format!(
            r#"    <div class="input-box"><label for="{field}_{id}">{label}</label><input type="text" id="{field}_{id}" name="{field}_{id}" placeholder="{label}" value="{}"></div>"#,
            escape_attribute(value)
        ));
    }
    lines.push("  </div>".to_string());
    lines.push(format!(r#"  <div class="group-controls" id="group-controls-{id}">"#));
    for binding in group.controls() {
        lines.push(format!(
            r#"    <button type="button" data-action="{}" data-group="{id}">{}</button>"#,
            binding.action.as_str(),
            action_label(binding.action)
        ));
    }
    lines.push("  </div>".to_string());
    lines.push("</div>".to_string());

    let mut html = lines.join("\n");
    html.push('\n');
    html
}

fn action_label(action: GroupAction) -> &'static str {
    match action {
        GroupAction::Save => "Save",
        GroupAction::Update => "Update",
        GroupAction::Remove => "Remove",
    }
}
