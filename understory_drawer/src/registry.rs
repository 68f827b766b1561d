// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer registry and its state machine.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use tracing::{debug, trace};
use understory_focus::{FocusOutcome, KeyPress};
use understory_responder::types::Action;

use crate::controller::DrawerController;
use crate::error::DrawerError;
use crate::host::DrawerHost;
use crate::scheduler::{Scheduler, Tick};
use crate::types::{DrawerEvent, DrawerOptions, Effect, EventKind, Timings};

/// Owner of every drawer controller, keyed by element identity.
///
/// The registry replaces any ambient, document-wide bookkeeping: applications
/// create one, register drawers explicitly and drive it with a host and a clock.
///
/// Every operation that can change state takes the current time `now` in
/// milliseconds and a [`DrawerHost`] to read from and write effects to.
/// Deferred work runs in [`Drawers::advance`].
#[derive(Clone, Debug)]
pub struct Drawers<K> {
    controllers: HashMap<K, DrawerController<K>>,
    /// Registration order; alignment signals are delivered in this order.
    order: Vec<K>,
    scheduler: Scheduler<K>,
    timings: Timings,
}

impl<K> Default for Drawers<K> {
    fn default() -> Self {
        Self {
            controllers: HashMap::new(),
            order: Vec::new(),
            scheduler: Scheduler::default(),
            timings: Timings::default(),
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> Drawers<K> {
    /// Create an empty registry with default [`Timings`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with custom timings.
    pub fn with_timings(timings: Timings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    /// Deferral constants in use.
    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Register a closed drawer under `key`.
    pub fn register(&mut self, key: K, options: DrawerOptions) -> Result<(), DrawerError> {
        if self.controllers.contains_key(&key) {
            return Err(DrawerError::AlreadyRegistered);
        }
        debug!(?key, ?options, "registered drawer");
        self.controllers
            .insert(key, DrawerController::new(key, options));
        self.order.push(key);
        Ok(())
    }

    /// Remove a drawer and cancel its pending deferred work.
    ///
    /// No effects are produced: the drawer is left as it is in the document.
    pub fn unregister(&mut self, key: K) -> Option<DrawerController<K>> {
        let controller = self.controllers.remove(&key)?;
        self.order.retain(|k| *k != key);
        let cancelled = self.scheduler.cancel(key);
        debug!(?key, cancelled, "unregistered drawer");
        Some(controller)
    }

    /// The controller registered under `key`.
    pub fn get(&self, key: K) -> Option<&DrawerController<K>> {
        self.controllers.get(&key)
    }

    /// Whether `key` has a registered drawer.
    pub fn is_registered(&self, key: K) -> bool {
        self.controllers.contains_key(&key)
    }

    /// Whether the drawer under `key` is open; `false` when unregistered.
    pub fn is_open(&self, key: K) -> bool {
        self.controllers.get(&key).is_some_and(DrawerController::is_open)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Number of registered drawers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no drawer is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pending deferred work.
    pub fn scheduler(&self) -> &Scheduler<K> {
        &self.scheduler
    }

    /// When [`Drawers::advance`] next has something to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Open the drawer under `key`.
    ///
    /// Returns `Ok(false)` without any effect when it is already open.
    pub fn open(
        &mut self,
        key: K,
        host: &mut impl DrawerHost<K>,
        now: u64,
    ) -> Result<bool, DrawerError> {
        let controller = self
            .controllers
            .get_mut(&key)
            .ok_or(DrawerError::NotRegistered)?;
        if controller.is_open() {
            trace!(?key, "open ignored, already open");
            return Ok(false);
        }
        controller.begin_open(host.active_element());
        let signal = controller.alignment().signal();
        host.apply(Effect::Notify(DrawerEvent {
            kind: signal,
            target: key,
        }));
        self.broadcast(signal, host, now);

        let controller = self
            .controllers
            .get_mut(&key)
            .ok_or(DrawerError::NotRegistered)?;
        let epoch = controller.commit_open();
        host.apply(Effect::SetVisible {
            element: key,
            visible: true,
        });
        // Keys pressed before the open tick are checked against this content.
        controller.arm_trap(host.focusables(key));
        host.apply(Effect::Notify(DrawerEvent {
            kind: EventKind::Open,
            target: key,
        }));
        let due = self
            .scheduler
            .schedule(now, self.timings.open_delay_ms, key, epoch, Tick::OpenCommit);
        debug!(?key, epoch, due, "drawer opened");
        Ok(true)
    }

    /// Close the drawer under `key`.
    ///
    /// Returns `Ok(false)` without any effect when it is already closed.
    pub fn close(
        &mut self,
        key: K,
        host: &mut impl DrawerHost<K>,
        now: u64,
    ) -> Result<bool, DrawerError> {
        if !self.controllers.contains_key(&key) {
            return Err(DrawerError::NotRegistered);
        }
        Ok(self.close_registered(key, host, now))
    }

    /// Close the drawer under `key` if open, else open it.
    pub fn toggle(
        &mut self,
        key: K,
        host: &mut impl DrawerHost<K>,
        now: u64,
    ) -> Result<bool, DrawerError> {
        if self.get(key).ok_or(DrawerError::NotRegistered)?.is_open() {
            self.close(key, host, now)
        } else {
            self.open(key, host, now)
        }
    }

    /// Dispatch a routed [`Action`].
    pub fn apply(
        &mut self,
        key: K,
        action: Action,
        host: &mut impl DrawerHost<K>,
        now: u64,
    ) -> Result<bool, DrawerError> {
        match action {
            Action::Open => self.open(key, host, now),
            Action::Close => self.close(key, host, now),
            Action::Toggle => self.toggle(key, host, now),
        }
    }

    /// Fire every deferred tick due at or before `now`; returns how many ran.
    ///
    /// Ticks scheduled before a later transition of the same drawer are
    /// dropped without effect.
    pub fn advance(&mut self, now: u64, host: &mut impl DrawerHost<K>) -> usize {
        let mut fired = 0;
        while let Some(deferred) = self.scheduler.pop_due(now) {
            let key = deferred.drawer;
            let Some(controller) = self.controllers.get_mut(&key) else {
                continue;
            };
            if !controller.is_current(deferred.epoch) {
                debug!(?key, tick = ?deferred.tick, epoch = deferred.epoch, "dropped stale tick");
                continue;
            }
            trace!(?key, tick = ?deferred.tick, due = deferred.due, "firing tick");
            fired += 1;
            match deferred.tick {
                Tick::OpenCommit => {
                    host.apply(Effect::SetOpenMarker {
                        element: key,
                        open: true,
                    });
                    if let Some(trigger) = controller.trigger() {
                        host.apply(Effect::SetExpanded {
                            element: trigger,
                            expanded: true,
                        });
                    }
                    // Without focusable content the drawer itself takes focus.
                    let entry = controller
                        .arm_focus(host.focusables(key), || host.sequencer_controls(key))
                        .unwrap_or(key);
                    host.apply(Effect::Focus(entry));
                }
                Tick::Hide => host.apply(Effect::SetVisible {
                    element: key,
                    visible: false,
                }),
            }
        }
        fired
    }

    /// Route a key press to the open drawer holding focus.
    ///
    /// Focus moves and Escape-to-close are applied here; the returned outcome
    /// tells the caller whether to prevent the key's default action.
    pub fn handle_key(
        &mut self,
        press: KeyPress,
        host: &mut impl DrawerHost<K>,
        now: u64,
    ) -> FocusOutcome<K> {
        let Some(active) = host.active_element() else {
            return FocusOutcome::Ignore;
        };
        let Some(key) = self
            .order
            .iter()
            .copied()
            .find(|&k| self.is_open(k) && host.contains(k, active))
        else {
            return FocusOutcome::Ignore;
        };
        let Some(controller) = self.controllers.get_mut(&key) else {
            return FocusOutcome::Ignore;
        };
        let outcome = controller.handle_key(press, Some(active), || host.sequencer_controls(key));
        match outcome {
            FocusOutcome::MoveFocus(target) => host.apply(Effect::Focus(target)),
            FocusOutcome::Close => {
                debug!(?key, "escape pressed");
                self.close_registered(key, host, now);
            }
            FocusOutcome::Ignore | FocusOutcome::Suppress => {}
        }
        outcome
    }

    fn broadcast(&mut self, signal: EventKind, host: &mut impl DrawerHost<K>, now: u64) {
        for key in self.order.clone() {
            let suspend = self
                .controllers
                .get_mut(&key)
                .is_some_and(|c| c.receive_signal(signal));
            if suspend {
                debug!(?key, signal = signal.name(), "closing same-side drawer");
                self.close_registered(key, host, now);
            }
        }
    }

    fn close_registered(&mut self, key: K, host: &mut impl DrawerHost<K>, now: u64) -> bool {
        let Some(controller) = self.controllers.get_mut(&key) else {
            return false;
        };
        if !controller.is_open() {
            trace!(?key, "close ignored, already closed");
            return false;
        }
        let epoch = controller.commit_close();
        let trigger = controller.trigger();
        let animated = controller.options().animated;

        host.apply(Effect::SetOpenMarker {
            element: key,
            open: false,
        });
        if let Some(trigger) = trigger {
            host.apply(Effect::SetExpanded {
                element: trigger,
                expanded: false,
            });
        }
        host.apply(Effect::Notify(DrawerEvent {
            kind: EventKind::Close,
            target: key,
        }));
        if animated {
            self.scheduler
                .schedule(now, self.timings.close_transition_ms, key, epoch, Tick::Hide);
        } else {
            host.apply(Effect::SetVisible {
                element: key,
                visible: false,
            });
        }
        let focus_inside = host
            .active_element()
            .is_some_and(|active| host.contains(key, active));
        match trigger {
            Some(trigger) if focus_inside => host.apply(Effect::Focus(trigger)),
            _ => {}
        }
        debug!(?key, epoch, animated, "drawer closed");
        true
    }
}
