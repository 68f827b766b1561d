// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus: focus containment primitives.
//!
//! This crate models keyboard focus inside an overlay (a drawer, a dialog) as a
//! combination of:
//! - **Key presses** ([`KeyPress`]) reduced to the keys containment cares about
//!   ([`Key::Tab`], [`Key::Escape`]) plus [`Modifiers`].
//! - **Per-node focus properties** ([`FocusProps`]) describing what kind of
//!   control a node is, its explicit tab index, and flags such as disabled or
//!   "this is the close control".
//! - A **focusable set** ([`FocusableSet`]): the ordered snapshot of candidates
//!   inside the overlay at the moment it opened, with `first`/`last` anchors.
//! - Two **cycling algorithms**:
//!   - [`FocusTrap`] lets native tab order run inside the set and only steps
//!     in at the edges (Tab on `last`, Shift+Tab on `first`), or closes on Escape.
//!   - [`TabSequencer`] replaces native tab order entirely with an index cursor
//!     over a freshly queried list of controls.
//!
//! A host picks exactly one algorithm per overlay (see [`FocusCycle`]).
//!
//! ## Minimal example
//!
//! A trap over a close button and two links:
//!
//! ```rust
//! use understory_focus::{
//!     ControlKind, FocusFlags, FocusProps, FocusTrap, FocusableSet, KeyPress, FocusOutcome,
//! };
//!
//! let set = FocusableSet::collect([
//!     (1_u32, FocusProps::control(ControlKind::Anchor).with_flags(FocusFlags::HAS_HREF)),
//!     (2_u32, FocusProps::control(ControlKind::Button).with_flags(FocusFlags::CLOSE_CONTROL)),
//!     (3_u32, FocusProps::control(ControlKind::Anchor).with_flags(FocusFlags::HAS_HREF)),
//! ]);
//! // The close control is the entry point…
//! assert_eq!(set.first(), Some(2));
//! assert_eq!(set.last(), Some(3));
//!
//! let trap = FocusTrap::new(set);
//! // …Tab on the last candidate wraps to it…
//! assert_eq!(trap.handle_key(KeyPress::TAB, Some(3)), FocusOutcome::MoveFocus(2));
//! // …and Escape asks the host to close the overlay.
//! assert_eq!(trap.handle_key(KeyPress::ESCAPE, Some(1)), FocusOutcome::Close);
//! ```
//!
//! The core types are generic over the node identifier `K`, so callers can use any small,
//! copyable handle (for example `understory_element_tree::NodeId`, or an
//! application-specific id).
//!
//! ## Features
//!
//! - `element_tree_adapter`: enables the [`adapters::element_tree`] module and pulls in
//!   `understory_element_tree` so you can build a [`FocusableSet`] directly from a
//!   `understory_element_tree::Tree`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`FocusCycle`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "element_tree_adapter")]
pub mod adapters;

mod sequencer;
mod set;
mod trap;

pub use sequencer::TabSequencer;
pub use set::FocusableSet;
pub use trap::{FocusTrap, FocusOutcome};

/// Direction of focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate (Tab).
    Next,
    /// Move to the previous candidate (Shift+Tab).
    Prev,
}

/// Keys that focus containment reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Tab key.
    Tab,
    /// The Escape key.
    Escape,
    /// Any other key; containment ignores it.
    Other,
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command.
        const META  = 0b0000_1000;
    }
}

/// A key press as seen by focus containment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key.
    pub key: Key,
    /// Modifiers held while pressing it.
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Plain Tab.
    pub const TAB: Self = Self::new(Key::Tab, Modifiers::empty());
    /// Shift+Tab.
    pub const SHIFT_TAB: Self = Self::new(Key::Tab, Modifiers::SHIFT);
    /// Plain Escape.
    pub const ESCAPE: Self = Self::new(Key::Escape, Modifiers::empty());

    /// Create a key press.
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Whether Shift is held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// The navigation intent of a Tab press, if this is one.
    pub fn navigation(&self) -> Option<Navigation> {
        match self.key {
            Key::Tab if self.shift() => Some(Navigation::Prev),
            Key::Tab => Some(Navigation::Next),
            Key::Escape | Key::Other => None,
        }
    }
}

/// Which focus-cycling algorithm governs an overlay.
///
/// Only one is ever active for a given overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FocusCycle {
    /// [`FocusTrap`]: native order inside, wrap at the edges.
    #[default]
    Trap,
    /// [`TabSequencer`]: manual cursor, native order always suppressed.
    Sequencer,
}

/// Kind of control a node represents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// A link (`a`).
    Anchor,
    /// A button.
    Button,
    /// A text or other input.
    Input,
    /// A select box.
    Select,
    /// A multi-line text area.
    TextArea,
    /// Anything else (headings, containers, …).
    #[default]
    Other,
}

impl ControlKind {
    /// Whether this is a form control that can be disabled.
    pub fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Input | Self::Select | Self::TextArea
        )
    }
}

bitflags::bitflags! {
    /// Per-node focus flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FocusFlags: u8 {
        /// The control is disabled.
        const DISABLED      = 0b0000_0001;
        /// The node is a link with an `href`.
        const HAS_HREF      = 0b0000_0010;
        /// The node closes the overlay; it becomes the trap's entry point.
        const CLOSE_CONTROL = 0b0000_0100;
        /// The node navigates back from a detail view.
        const BACK_CONTROL  = 0b0000_1000;
    }
}

/// Per-node focus properties provided by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusProps {
    /// What kind of control this is.
    pub kind: ControlKind,
    /// Explicit tab index, if the node carries one.
    pub tab_index: Option<i32>,
    /// Flags.
    pub flags: FocusFlags,
}

impl FocusProps {
    /// Properties for a control of the given kind with no tab index or flags.
    pub fn control(kind: ControlKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Builder: set the explicit tab index.
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Builder: add flags.
    pub fn with_flags(mut self, flags: FocusFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Whether a [`FocusTrap`] considers this node a candidate.
    ///
    /// Matches explicit `tabindex="0"`, links with an `href`, and enabled
    /// buttons, inputs, selects and text areas.
    pub fn is_trap_candidate(&self) -> bool {
        if self.tab_index == Some(0) {
            return true;
        }
        match self.kind {
            ControlKind::Anchor => self.flags.contains(FocusFlags::HAS_HREF),
            kind if kind.is_form_control() => !self.flags.contains(FocusFlags::DISABLED),
            _ => false,
        }
    }

    /// Whether a [`TabSequencer`] considers this node a control.
    ///
    /// Matches the back and close controls, anything with tab index `-1` or `0`,
    /// buttons, inputs and links.
    pub fn is_sequencer_control(&self) -> bool {
        self.flags
            .intersects(FocusFlags::BACK_CONTROL | FocusFlags::CLOSE_CONTROL)
            || matches!(self.tab_index, Some(-1 | 0))
            || matches!(
                self.kind,
                ControlKind::Button | ControlKind::Input | ControlKind::Anchor
            )
    }
}
