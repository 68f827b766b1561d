// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.

use crate::types::{Route, TriggerLookup};

/// Delegated trigger router.
///
/// The router owns no tree data. It remembers the delegation root it is
/// attached to and resolves activations against a [`TriggerLookup`] supplied
/// per call, so the same router keeps working as the tree changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerRouter<K> {
    root: Option<K>,
}

impl<K> Default for TriggerRouter<K> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<K: Copy + Eq> TriggerRouter<K> {
    /// Create a detached router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to a delegation root, replacing any previous one.
    pub fn attach(&mut self, root: K) {
        self.root = Some(root);
    }

    /// Detach; subsequent activations route nothing.
    pub fn detach(&mut self) {
        self.root = None;
    }

    /// Whether the router is attached.
    pub fn is_attached(&self) -> bool {
        self.root.is_some()
    }

    /// The delegation root, if attached.
    pub fn root(&self) -> Option<K> {
        self.root
    }

    /// Route an activation of `origin`.
    ///
    /// Returns `None` when detached, when no node between `origin` and the
    /// delegation root carries a marker, or when `origin` is outside the root.
    pub fn route(&self, lookup: &impl TriggerLookup<K>, origin: K) -> Option<Route<K>> {
        let root = self.root?;
        let trigger = Self::nearest_trigger(lookup, origin, root)?;
        let action = lookup.markers_of(&trigger).action()?;
        Some(Route {
            origin,
            trigger,
            action,
            targets: lookup.targets_of(&trigger),
        })
    }

    fn nearest_trigger(lookup: &impl TriggerLookup<K>, origin: K, root: K) -> Option<K> {
        let mut found = None;
        let mut cur = origin;
        // Walk to the root; caller ensures acyclic ancestry.
        loop {
            if found.is_none() && !lookup.markers_of(&cur).is_empty() {
                found = Some(cur);
            }
            if cur == root {
                return found;
            }
            cur = lookup.parent_of(&cur)?;
        }
    }
}
