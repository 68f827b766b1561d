// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered snapshot of focusable candidates.

use alloc::vec::Vec;

use crate::{FocusFlags, FocusProps};

/// Ordered snapshot of the focusable candidates inside an overlay.
///
/// A set is computed once (typically when the overlay opens) and never updated
/// in place: if the underlying tree changes, compute a new one.
///
/// - [`FocusableSet::first`] is the close control when one exists among the
///   candidates, else the first candidate in document order.
/// - [`FocusableSet::last`] is always the last candidate in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusableSet<K> {
    nodes: Vec<K>,
    close: Option<K>,
}

impl<K> Default for FocusableSet<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            close: None,
        }
    }
}

impl<K: Copy + Eq> FocusableSet<K> {
    /// Build a set from `(id, props)` pairs given in document order.
    ///
    /// Entries that are not trap candidates are skipped. The first entry flagged
    /// [`FocusFlags::CLOSE_CONTROL`] becomes the designated close control.
    pub fn collect(entries: impl IntoIterator<Item = (K, FocusProps)>) -> Self {
        let mut set = Self::default();
        for (id, props) in entries {
            if !props.is_trap_candidate() {
                continue;
            }
            if set.close.is_none() && props.flags.contains(FocusFlags::CLOSE_CONTROL) {
                set.close = Some(id);
            }
            set.nodes.push(id);
        }
        set
    }

    /// Build a set from ids already known to be focusable, in document order.
    pub fn from_ordered(nodes: Vec<K>, close: Option<K>) -> Self {
        let close = close.filter(|c| nodes.contains(c));
        Self { nodes, close }
    }

    /// Entry point: the close control if present, else the first candidate.
    pub fn first(&self) -> Option<K> {
        self.close.or_else(|| self.nodes.first().copied())
    }

    /// The last candidate in document order.
    pub fn last(&self) -> Option<K> {
        self.nodes.last().copied()
    }

    /// The designated close control, if any.
    pub fn close_control(&self) -> Option<K> {
        self.close
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set has no candidates.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` is a candidate.
    pub fn contains(&self, id: K) -> bool {
        self.nodes.contains(&id)
    }

    /// Candidates in document order.
    pub fn as_slice(&self) -> &[K] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ControlKind;
    use alloc::vec;

    fn button() -> FocusProps {
        FocusProps::control(ControlKind::Button)
    }

    #[test]
    fn first_prefers_close_control() {
        let set = FocusableSet::collect([
            (1_u32, button()),
            (2, button().with_flags(FocusFlags::CLOSE_CONTROL)),
            (3, button()),
        ]);
        assert_eq!(set.first(), Some(2));
        assert_eq!(set.last(), Some(3));
        assert_eq!(set.close_control(), Some(2));
        assert_eq!(set.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn first_falls_back_to_document_order() {
        let set = FocusableSet::collect([
            (1_u32, FocusProps::control(ControlKind::Other)),
            (2, button()),
            (3, FocusProps::control(ControlKind::Other).with_tab_index(0)),
        ]);
        assert_eq!(set.first(), Some(2));
        assert_eq!(set.last(), Some(3));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(1));
    }

    #[test]
    fn disabled_close_control_is_not_designated() {
        let set = FocusableSet::collect([
            (1_u32, button()),
            (
                2,
                button().with_flags(FocusFlags::CLOSE_CONTROL | FocusFlags::DISABLED),
            ),
        ]);
        assert_eq!(set.close_control(), None);
        assert_eq!(set.first(), Some(1));
    }

    #[test]
    fn empty_set_has_no_anchors() {
        let set: FocusableSet<u32> = FocusableSet::collect([]);
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
    }

    #[test]
    fn from_ordered_drops_foreign_close_control() {
        let set = FocusableSet::from_ordered(vec![4_u32, 5], Some(9));
        assert_eq!(set.close_control(), None);
        assert_eq!(set.first(), Some(4));
    }
}
