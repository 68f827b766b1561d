// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam.

use alloc::vec::Vec;

use understory_focus::FocusableSet;

use crate::types::Effect;

/// Document access the drawer engine needs.
///
/// The engine reads through the query methods and writes only through
/// [`DrawerHost::apply`]; effects are applied in the order they are produced.
pub trait DrawerHost<K> {
    /// The focused element, if any.
    fn active_element(&self) -> Option<K>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: K, node: K) -> bool;

    /// Focusable candidates inside `drawer`, in document order.
    fn focusables(&self, drawer: K) -> FocusableSet<K>;

    /// Controls a tab sequencer walks inside `drawer`, in document order.
    fn sequencer_controls(&self, drawer: K) -> Vec<K>;

    /// Apply a side effect.
    fn apply(&mut self, effect: Effect<K>);
}
