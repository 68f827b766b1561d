// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration, signals and effects.

use understory_focus::FocusCycle;

/// Side of the viewport a drawer slides in from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    /// Slides in from the left.
    #[default]
    Left,
    /// Slides in from the right.
    Right,
}

impl Alignment {
    /// The signal broadcast when a drawer on this side starts opening.
    pub fn signal(self) -> EventKind {
        match self {
            Self::Left => EventKind::LeftDrawer,
            Self::Right => EventKind::RightDrawer,
        }
    }

    /// Class marking a drawer element with this alignment.
    pub fn class(self) -> &'static str {
        match self {
            Self::Left => "o-drawer-left",
            Self::Right => "o-drawer-right",
        }
    }
}

/// Deferral constants, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timings {
    /// Delay between becoming visible and applying the open marker and focus.
    pub open_delay_ms: u64,
    /// Delay between removing the open marker and hiding an animated drawer.
    pub close_transition_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            open_delay_ms: 50,
            close_transition_ms: 400,
        }
    }
}

/// Per-drawer configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawerOptions {
    /// Side the drawer belongs to.
    pub alignment: Alignment,
    /// Whether hiding waits for the close transition.
    pub animated: bool,
    /// Which focus-cycling algorithm governs the open drawer.
    pub focus_cycle: FocusCycle,
}

impl DrawerOptions {
    /// Options for a drawer on `alignment`.
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Self::default()
        }
    }

    /// Builder: set whether the drawer is animated.
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Builder: set the focus-cycling algorithm.
    pub fn focus_cycle(mut self, focus_cycle: FocusCycle) -> Self {
        self.focus_cycle = focus_cycle;
        self
    }
}

/// Snapshot of a drawer's state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DrawerState<K> {
    /// Whether the drawer is open.
    pub is_open: bool,
    /// Side the drawer belongs to.
    pub alignment: Alignment,
    /// Set to the drawer's own key while it broadcasts its alignment signal.
    pub current_target: Option<K>,
    /// Whether hiding waits for the close transition.
    pub animated: bool,
}

/// Kind of a drawer signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A right-aligned drawer is opening.
    RightDrawer,
    /// A left-aligned drawer is opening.
    LeftDrawer,
    /// The drawer opened.
    Open,
    /// The drawer closed.
    Close,
}

impl EventKind {
    /// Wire name of the signal.
    pub fn name(self) -> &'static str {
        match self {
            Self::RightDrawer => "o.Drawer.RightDrawer",
            Self::LeftDrawer => "o.Drawer.LeftDrawer",
            Self::Open => "oDrawer.open",
            Self::Close => "oDrawer.close",
        }
    }
}

/// A signal dispatched on a drawer element. All drawer signals bubble.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DrawerEvent<K> {
    /// What happened.
    pub kind: EventKind,
    /// Drawer element the signal is dispatched on.
    pub target: K,
}

impl<K> DrawerEvent<K> {
    /// Wire name of the signal.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether the signal bubbles.
    pub fn bubbles(&self) -> bool {
        true
    }
}

/// A side effect the host applies to its document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Effect<K> {
    /// Show or hide an element.
    SetVisible {
        /// Element to change.
        element: K,
        /// Whether it is displayed.
        visible: bool,
    },
    /// Add or remove a drawer's open marker.
    SetOpenMarker {
        /// Drawer element.
        element: K,
        /// Whether the marker is present.
        open: bool,
    },
    /// Update a trigger's expanded indicator.
    SetExpanded {
        /// Trigger element.
        element: K,
        /// New value.
        expanded: bool,
    },
    /// Move focus.
    Focus(K),
    /// Dispatch a signal.
    Notify(DrawerEvent<K>),
}
