// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording host over a toy parent map.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::{HashMap, HashSet};

use understory_drawer::{DrawerEvent, DrawerHost, Effect, EventKind};
use understory_focus::FocusableSet;

#[derive(Debug, Default)]
pub struct TestHost {
    pub parents: HashMap<u32, u32>,
    pub focused: Option<u32>,
    pub visible: HashSet<u32>,
    pub marked: HashSet<u32>,
    pub expanded: HashMap<u32, bool>,
    pub controls: HashMap<u32, Vec<u32>>,
    pub close_controls: HashMap<u32, u32>,
    pub events: Vec<DrawerEvent<u32>>,
    pub effects: Vec<Effect<u32>>,
}

impl TestHost {
    /// Give `drawer` the listed child controls; the first `close` among them
    /// becomes its close control.
    pub fn with_drawer(mut self, drawer: u32, controls: &[u32], close: Option<u32>) -> Self {
        for &c in controls {
            self.parents.insert(c, drawer);
        }
        self.controls.insert(drawer, controls.to_vec());
        if let Some(close) = close {
            self.close_controls.insert(drawer, close);
        }
        self
    }

    pub fn count(&self, kind: EventKind, target: u32) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == kind && e.target == target)
            .count()
    }

    pub fn is_visible(&self, node: u32) -> bool {
        self.visible.contains(&node)
    }

    pub fn is_marked(&self, node: u32) -> bool {
        self.marked.contains(&node)
    }
}

impl DrawerHost<u32> for TestHost {
    fn active_element(&self) -> Option<u32> {
        self.focused
    }

    fn contains(&self, ancestor: u32, node: u32) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parents.get(&n).copied();
        }
        false
    }

    fn focusables(&self, drawer: u32) -> FocusableSet<u32> {
        FocusableSet::from_ordered(
            self.controls.get(&drawer).cloned().unwrap_or_default(),
            self.close_controls.get(&drawer).copied(),
        )
    }

    fn sequencer_controls(&self, drawer: u32) -> Vec<u32> {
        self.controls.get(&drawer).cloned().unwrap_or_default()
    }

    fn apply(&mut self, effect: Effect<u32>) {
        self.effects.push(effect);
        match effect {
            Effect::SetVisible { element, visible } => {
                if visible {
                    self.visible.insert(element);
                } else {
                    self.visible.remove(&element);
                }
            }
            Effect::SetOpenMarker { element, open } => {
                if open {
                    self.marked.insert(element);
                } else {
                    self.marked.remove(&element);
                }
            }
            Effect::SetExpanded { element, expanded } => {
                self.expanded.insert(element, expanded);
            }
            Effect::Focus(node) => self.focused = Some(node),
            Effect::Notify(event) => self.events.push(event),
        }
    }
}
