// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Understory Element Tree.
//!
//! ## Feature
//!
//! Enable with `element_tree_adapter`.
//!
//! ## Notes
//!
//! Hidden elements are skipped together with their subtrees, the way a browser
//! removes `display: none` content from tab order. The overlay root itself is
//! never a candidate.

use alloc::vec::Vec;

use understory_element_tree::{Element, NodeId, Tag, Tree};

use crate::{ControlKind, FocusFlags, FocusProps, FocusableSet};

/// Attribute marking the control that closes the overlay.
pub const CLOSE_ATTR: &str = "data-close";

/// Attribute marking the control that navigates back from a detail view.
pub const BACK_ATTR: &str = "data-back";

/// Derive focus properties from an element.
pub fn focus_props(element: &Element) -> FocusProps {
    let kind = match element.tag {
        Tag::Anchor => ControlKind::Anchor,
        Tag::Button => ControlKind::Button,
        Tag::Input => ControlKind::Input,
        Tag::Select => ControlKind::Select,
        Tag::TextArea => ControlKind::TextArea,
        _ => ControlKind::Other,
    };
    let mut flags = FocusFlags::empty();
    flags.set(FocusFlags::DISABLED, element.is_disabled());
    flags.set(FocusFlags::HAS_HREF, element.has_attr("href"));
    flags.set(FocusFlags::CLOSE_CONTROL, element.has_attr(CLOSE_ATTR));
    flags.set(FocusFlags::BACK_CONTROL, element.has_attr(BACK_ATTR));
    FocusProps {
        kind,
        tab_index: element.tab_index(),
        flags,
    }
}

/// Focusable candidates under `root`, in document order.
pub fn focusable_set(tree: &Tree, root: NodeId) -> FocusableSet<NodeId> {
    FocusableSet::collect(displayed_descendants(tree, root))
}

/// Controls a [`TabSequencer`](crate::TabSequencer) walks under `root`, in
/// document order.
pub fn sequencer_controls(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    displayed_descendants(tree, root)
        .into_iter()
        .filter(|(_, props)| props.is_sequencer_control())
        .map(|(id, _)| id)
        .collect()
}

fn displayed_descendants(tree: &Tree, root: NodeId) -> Vec<(NodeId, FocusProps)> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = tree.children_of(root).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let Some(element) = tree.element(id) else {
            continue;
        };
        if !element.is_visible() {
            continue;
        }
        out.push((id, focus_props(element)));
        stack.extend(tree.children_of(id).iter().rev().copied());
    }
    out
}
