// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Master/detail view routing.
//!
//! A drawer's content is a flat, ordered list of [`ViewNode`]s. Basic views form
//! the list level and may reference a detail view by id; detail views carry
//! their own id. [`NavigationState`] decides which of them are rendered:
//!
//! - in list mode, every basic view in order;
//! - in detail mode, the detail views whose id equals
//!   [`NavigationState::display_view_id`].
//!
//! A reference that matches no detail view renders nothing.
//!
//! ```
//! use understory_drawer::views::{NavigationState, ViewNode, visible_views};
//!
//! let views: [ViewNode<&str, &str>; 3] = [
//!     ViewNode::basic("A").with_detail("detail1"),
//!     ViewNode::basic("B"),
//!     ViewNode::detail("detail1", "D1"),
//! ];
//! let mut nav = NavigationState::default();
//! let shown: Vec<_> = visible_views(&views, &nav).iter().map(|v| v.content).collect();
//! assert_eq!(shown, ["A", "B"]);
//!
//! nav.select("detail1");
//! let shown: Vec<_> = visible_views(&views, &nav).iter().map(|v| v.content).collect();
//! assert_eq!(shown, ["D1"]);
//! ```

use alloc::format;
use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::warn;
use understory_focus::TabSequencer;

use crate::error::ViewError;

/// Discriminator of a content child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind<I> {
    /// List-level view, optionally leading to a detail view.
    Basic {
        /// Id of the detail view this view opens.
        detail: Option<I>,
    },
    /// Detail-level view.
    Detail {
        /// Id basic views reference.
        id: I,
    },
}

/// A content child: its kind plus caller content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewNode<I, C> {
    /// Kind and addressing.
    pub kind: ViewKind<I>,
    /// Caller content.
    pub content: C,
}

impl<I, C> ViewNode<I, C> {
    /// A basic view without a detail reference.
    pub fn basic(content: C) -> Self {
        Self {
            kind: ViewKind::Basic { detail: None },
            content,
        }
    }

    /// A detail view with `id`.
    pub fn detail(id: impl Into<I>, content: C) -> Self {
        Self {
            kind: ViewKind::Detail { id: id.into() },
            content,
        }
    }

    /// Builder: point a basic view at a detail view. No-op on detail views.
    pub fn with_detail(mut self, detail: impl Into<I>) -> Self {
        if let ViewKind::Basic { detail: slot } = &mut self.kind {
            *slot = Some(detail.into());
        }
        self
    }

    /// Whether this is a basic view.
    pub fn is_basic(&self) -> bool {
        matches!(self.kind, ViewKind::Basic { .. })
    }

    /// Detail reference of a basic view.
    pub fn detail_ref(&self) -> Option<&I> {
        match &self.kind {
            ViewKind::Basic { detail } => detail.as_ref(),
            ViewKind::Detail { .. } => None,
        }
    }

    /// Id of a detail view.
    pub fn detail_id(&self) -> Option<&I> {
        match &self.kind {
            ViewKind::Detail { id } => Some(id),
            ViewKind::Basic { .. } => None,
        }
    }
}

/// Which level of the content is shown, and the tab cursor over its controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState<I> {
    /// `true` in detail mode.
    pub back: bool,
    /// Detail view to show in detail mode.
    pub display_view_id: Option<I>,
    sequencer: TabSequencer,
}

impl<I> Default for NavigationState<I> {
    fn default() -> Self {
        Self {
            back: false,
            display_view_id: None,
            sequencer: TabSequencer::new(),
        }
    }
}

impl<I> NavigationState<I> {
    /// Switch to detail mode showing `detail`, resetting the tab cursor.
    pub fn select(&mut self, detail: impl Into<I>) {
        self.back = true;
        self.display_view_id = Some(detail.into());
        self.sequencer.reset();
    }

    /// Return to list mode.
    pub fn back(&mut self) {
        self.back = false;
        self.sequencer.reset();
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.back = false;
        self.display_view_id = None;
        self.sequencer.reset();
    }

    /// Whether a detail view is shown.
    pub fn is_detail(&self) -> bool {
        self.back
    }

    /// Tab cursor.
    pub fn tab_cursor(&self) -> usize {
        self.sequencer.cursor()
    }

    pub(crate) fn sequencer_mut(&mut self) -> &mut TabSequencer {
        &mut self.sequencer
    }
}

/// Views rendered for `nav`, in content order.
pub fn visible_views<'a, I: PartialEq + Debug, C>(
    views: &'a [ViewNode<I, C>],
    nav: &NavigationState<I>,
) -> Vec<&'a ViewNode<I, C>> {
    if !nav.back {
        return views.iter().filter(|v| v.is_basic()).collect();
    }
    let shown: Vec<_> = views
        .iter()
        .filter(|v| v.detail_id().is_some() && v.detail_id() == nav.display_view_id.as_ref())
        .collect();
    if shown.is_empty() {
        warn!(display_view_id = ?nav.display_view_id, "no detail view to display");
    }
    shown
}

/// Check that every detail reference resolves to exactly one detail view.
///
/// Rendering does not depend on this; it only reports problems.
pub fn validate<I: PartialEq + Debug, C>(views: &[ViewNode<I, C>]) -> Result<(), ViewError> {
    for (i, view) in views.iter().enumerate() {
        if let Some(id) = view.detail_id()
            && views[i + 1..].iter().any(|v| v.detail_id() == Some(id))
        {
            return Err(ViewError::DuplicateDetail(format!("{id:?}")));
        }
    }
    for detail in views.iter().filter_map(ViewNode::detail_ref) {
        if !views.iter().any(|v| v.detail_id() == Some(detail)) {
            return Err(ViewError::UnresolvedDetail(format!("{detail:?}")));
        }
    }
    Ok(())
}
