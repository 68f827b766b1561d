// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-wrapping focus trap.

use crate::{FocusableSet, Key, KeyPress};

/// What the host should do in response to a key press inside an overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusOutcome<K> {
    /// Not handled; let native navigation proceed.
    Ignore,
    /// Prevent default navigation and move focus to the given node.
    MoveFocus(K),
    /// Prevent default navigation and leave focus where it is.
    Suppress,
    /// Close the overlay (Escape).
    Close,
}

impl<K> FocusOutcome<K> {
    /// Whether the host should prevent the key's default action.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

/// Keeps Tab cycling inside a [`FocusableSet`].
///
/// Native tab order is trusted between the edges; the trap only intervenes when
/// focus would leave the set:
///
/// - Tab on [`FocusableSet::last`] moves to [`FocusableSet::first`].
/// - Shift+Tab on [`FocusableSet::first`] moves to [`FocusableSet::last`].
/// - With one candidate (or none) Tab is always suppressed.
/// - Escape reports [`FocusOutcome::Close`].
///
/// The trap assumes nothing else moves focus outside the set while it is active.
/// It also only guards the two anchors: when the close control is not first in
/// document order, Shift+Tab on the candidate before it is left to native
/// navigation, which can move focus out of the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusTrap<K> {
    set: FocusableSet<K>,
}

impl<K> Default for FocusTrap<K> {
    fn default() -> Self {
        Self {
            set: FocusableSet::default(),
        }
    }
}

impl<K: Copy + Eq> FocusTrap<K> {
    /// Create a trap over a snapshot.
    pub fn new(set: FocusableSet<K>) -> Self {
        Self { set }
    }

    /// Replace the snapshot (call on every open).
    pub fn reset(&mut self, set: FocusableSet<K>) {
        self.set = set;
    }

    /// Drop the snapshot; an empty trap suppresses Tab.
    pub fn clear(&mut self) {
        self.set = FocusableSet::default();
    }

    /// The current snapshot.
    pub fn set(&self) -> &FocusableSet<K> {
        &self.set
    }

    /// Where focus should land when the trap activates.
    pub fn entry_point(&self) -> Option<K> {
        self.set.first()
    }

    /// Decide how to handle `press` given the currently focused node.
    pub fn handle_key(&self, press: KeyPress, focused: Option<K>) -> FocusOutcome<K> {
        match press.key {
            Key::Escape => FocusOutcome::Close,
            Key::Tab => self.handle_tab(press.shift(), focused),
            Key::Other => FocusOutcome::Ignore,
        }
    }

    fn handle_tab(&self, shift: bool, focused: Option<K>) -> FocusOutcome<K> {
        let (Some(first), Some(last)) = (self.set.first(), self.set.last()) else {
            return FocusOutcome::Suppress;
        };
        if self.set.len() == 1 {
            return FocusOutcome::Suppress;
        }
        match (shift, focused) {
            (false, Some(f)) if f == last => FocusOutcome::MoveFocus(first),
            (true, Some(f)) if f == first => FocusOutcome::MoveFocus(last),
            _ => FocusOutcome::Ignore,
        }
    }
}
