// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-driven deferred work.
//!
//! Timestamps are host-supplied milliseconds from any monotonic clock. Nothing
//! fires on its own: the host calls [`Scheduler::pop_due`] (usually through
//! [`Drawers::advance`](crate::Drawers::advance)) whenever time has passed.
//!
//! ```
//! use understory_drawer::scheduler::{Scheduler, Tick};
//!
//! let mut s: Scheduler<u32> = Scheduler::new();
//! s.schedule(1000, 400, 7, 3, Tick::Hide);
//! s.schedule(1000, 50, 7, 2, Tick::OpenCommit);
//! assert_eq!(s.next_due(), Some(1050));
//!
//! assert!(s.pop_due(1049).is_none());
//! let first = s.pop_due(1500).unwrap();
//! assert_eq!((first.tick, first.epoch), (Tick::OpenCommit, 2));
//! assert_eq!(s.pop_due(1500).unwrap().tick, Tick::Hide);
//! assert!(s.is_empty());
//! ```

use alloc::collections::BTreeMap;

/// What a deferred entry does when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tick {
    /// Apply the open marker, update the trigger and move focus inside.
    OpenCommit,
    /// Hide an animated drawer after its close transition.
    Hide,
}

/// A scheduled entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Deferred<K> {
    /// When the entry becomes due.
    pub due: u64,
    /// Drawer the entry belongs to.
    pub drawer: K,
    /// Drawer epoch at scheduling time; a mismatch at firing time means stale.
    pub epoch: u64,
    /// What to do.
    pub tick: Tick,
}

/// Due-ordered queue of deferred ticks.
///
/// Entries with the same due time fire in scheduling order.
#[derive(Clone, Debug)]
pub struct Scheduler<K> {
    /// Pending entries keyed by `(due, sequence)`.
    queue: BTreeMap<(u64, u64), Deferred<K>>,
    next_seq: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + PartialEq> Scheduler<K> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `tick` for `drawer`, due `delay` milliseconds after `now`.
    pub fn schedule(&mut self, now: u64, delay: u64, drawer: K, epoch: u64, tick: Tick) -> u64 {
        let due = now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert(
            (due, seq),
            Deferred {
                due,
                drawer,
                epoch,
                tick,
            },
        );
        due
    }

    /// Remove and return the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Deferred<K>> {
        let entry = self.queue.first_entry()?;
        if entry.key().0 > now {
            return None;
        }
        Some(entry.remove())
    }

    /// Drop every entry for `drawer`; returns how many were dropped.
    pub fn cancel(&mut self, drawer: K) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, d| d.drawer != drawer);
        before - self.queue.len()
    }

    /// Due time of the earliest entry.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending entries in firing order.
    pub fn pending(&self) -> impl Iterator<Item = &Deferred<K>> + '_ {
        self.queue.values()
    }
}
