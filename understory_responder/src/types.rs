// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for trigger routing.

use smallvec::SmallVec;

/// What a trigger asks its targets to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Open the target.
    Open,
    /// Close the target.
    Close,
    /// Close the target if open, else open it.
    Toggle,
}

bitflags::bitflags! {
    /// Action markers carried by a node.
    ///
    /// A node may carry several; [`Markers::action`] picks one.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// Marks a toggle trigger.
        const TOGGLE = 0b0000_0001;
        /// Marks a close trigger.
        const CLOSE  = 0b0000_0010;
        /// Marks an open trigger.
        const OPEN   = 0b0000_0100;
    }
}

impl Markers {
    /// The action these markers request, by priority toggle > close > open.
    pub fn action(self) -> Option<Action> {
        if self.contains(Self::TOGGLE) {
            Some(Action::Toggle)
        } else if self.contains(Self::CLOSE) {
            Some(Action::Close)
        } else if self.contains(Self::OPEN) {
            Some(Action::Open)
        } else {
            None
        }
    }
}

/// Tree queries the router needs.
///
/// Implementations must keep ancestry acyclic.
pub trait TriggerLookup<K> {
    /// Parent of `node`, or `None` at a root.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Action markers carried by `node`.
    fn markers_of(&self, node: &K) -> Markers;

    /// Targets addressed by `trigger`, in document order.
    ///
    /// An unresolvable address yields an empty list.
    fn targets_of(&self, trigger: &K) -> SmallVec<[K; 4]>;
}

/// The outcome of routing one activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route<K> {
    /// Node that was activated.
    pub origin: K,
    /// Nearest marker-bearing ancestor of `origin` (inclusive).
    pub trigger: K,
    /// Requested action.
    pub action: Action,
    /// Every node that receives `action`.
    pub targets: SmallVec<[K; 4]>,
}

impl<K> Route<K> {
    /// Whether the platform's default action should be prevented.
    ///
    /// Always `true`: a matched trigger never navigates, even with no targets.
    pub fn prevents_default(&self) -> bool {
        true
    }
}
