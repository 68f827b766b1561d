// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-drawer state.

use alloc::vec::Vec;

use understory_focus::{FocusCycle, FocusOutcome, FocusTrap, FocusableSet, KeyPress, TabSequencer};

use crate::types::{Alignment, DrawerOptions, DrawerState, EventKind};

/// State of one registered drawer.
///
/// Controllers are owned by [`Drawers`](crate::Drawers), which performs every
/// transition; this type exposes read access and the bookkeeping the registry
/// relies on.
#[derive(Clone, Debug)]
pub struct DrawerController<K> {
    key: K,
    options: DrawerOptions,
    is_open: bool,
    current_target: Option<K>,
    trigger: Option<K>,
    /// Bumped on every transition; deferred ticks from older epochs are stale.
    epoch: u64,
    trap: FocusTrap<K>,
    sequencer: TabSequencer,
}

impl<K: Copy + Eq> DrawerController<K> {
    pub(crate) fn new(key: K, options: DrawerOptions) -> Self {
        Self {
            key,
            options,
            is_open: false,
            current_target: None,
            trigger: None,
            epoch: 0,
            trap: FocusTrap::default(),
            sequencer: TabSequencer::new(),
        }
    }

    /// Key the drawer is registered under.
    pub fn key(&self) -> K {
        self.key
    }

    /// Configuration.
    pub fn options(&self) -> &DrawerOptions {
        &self.options
    }

    /// Side the drawer belongs to.
    pub fn alignment(&self) -> Alignment {
        self.options.alignment
    }

    /// Whether the drawer is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Element that was focused when the drawer last opened.
    pub fn trigger(&self) -> Option<K> {
        self.trigger
    }

    /// Current transition epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Snapshot of the drawer's state.
    pub fn state(&self) -> DrawerState<K> {
        DrawerState {
            is_open: self.is_open,
            alignment: self.options.alignment,
            current_target: self.current_target,
            animated: self.options.animated,
        }
    }

    /// Focus trap over the content of the current open; empty while closed.
    pub fn trap(&self) -> &FocusTrap<K> {
        &self.trap
    }

    /// Tab sequencer cursor.
    pub fn sequencer(&self) -> &TabSequencer {
        &self.sequencer
    }

    pub(crate) fn begin_open(&mut self, active: Option<K>) {
        self.trigger = active;
        self.current_target = Some(self.key);
    }

    /// Handle an alignment signal; returns whether this drawer must close.
    pub(crate) fn receive_signal(&mut self, signal: EventKind) -> bool {
        let suspend = signal == self.options.alignment.signal()
            && self.is_open
            && self.current_target.is_none();
        self.current_target = None;
        suspend
    }

    pub(crate) fn commit_open(&mut self) -> u64 {
        self.is_open = true;
        self.epoch += 1;
        self.epoch
    }

    pub(crate) fn commit_close(&mut self) -> u64 {
        self.is_open = false;
        self.epoch += 1;
        self.sequencer.reset();
        self.trap.clear();
        self.epoch
    }

    pub(crate) fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Snapshot the content as it is now, without choosing a focus target.
    pub(crate) fn arm_trap(&mut self, set: FocusableSet<K>) {
        self.sequencer.reset();
        self.trap.reset(set);
    }

    /// Re-arm focus containment and return where focus should land.
    ///
    /// A sequencer's cursor is placed on the returned control so the first
    /// Tab moves past it.
    pub(crate) fn arm_focus(
        &mut self,
        set: FocusableSet<K>,
        controls: impl FnOnce() -> Vec<K>,
    ) -> Option<K> {
        self.arm_trap(set);
        let entry = self.trap.entry_point();
        if let (FocusCycle::Sequencer, Some(entry)) = (self.options.focus_cycle, entry) {
            self.sequencer.sync_to(&entry, &controls());
        }
        entry
    }

    pub(crate) fn handle_key(
        &mut self,
        press: KeyPress,
        focused: Option<K>,
        controls: impl FnOnce() -> Vec<K>,
    ) -> FocusOutcome<K> {
        match self.options.focus_cycle {
            FocusCycle::Trap => self.trap.handle_key(press, focused),
            FocusCycle::Sequencer => self.sequencer.handle_key(press, &controls()),
        }
    }
}
