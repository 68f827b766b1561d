// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor-based tab sequencing.

use crate::{FocusOutcome, Key, KeyPress, Navigation};

/// Index cursor that replaces native tab order.
///
/// The sequencer never caches the controls it walks: callers pass the list as it
/// is *now* on every key press, so sections that appear or disappear between
/// presses are picked up immediately. Tab moves the cursor forward and wraps to
/// `0` past the end; Shift+Tab moves it back and stops at `0`. Default Tab
/// navigation is always suppressed.
///
/// ```rust
/// use understory_focus::{FocusOutcome, KeyPress, TabSequencer};
///
/// let controls = ["back", "close", "link"];
/// let mut seq = TabSequencer::new();
/// assert_eq!(seq.handle_key(KeyPress::TAB, &controls), FocusOutcome::MoveFocus("close"));
/// assert_eq!(seq.handle_key(KeyPress::TAB, &controls), FocusOutcome::MoveFocus("link"));
/// assert_eq!(seq.handle_key(KeyPress::TAB, &controls), FocusOutcome::MoveFocus("back"));
/// assert_eq!(seq.handle_key(KeyPress::SHIFT_TAB, &controls), FocusOutcome::MoveFocus("back"));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TabSequencer {
    cursor: usize,
}

impl TabSequencer {
    /// A sequencer with its cursor at `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor back to `0`.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Place the cursor on `focused` within `controls`, or at `0` when it is
    /// not one of them.
    pub fn sync_to<K: PartialEq>(&mut self, focused: &K, controls: &[K]) {
        self.cursor = controls.iter().position(|c| c == focused).unwrap_or(0);
    }

    /// Step the cursor over `count` controls and return the new index.
    ///
    /// Returns `None` (and resets the cursor) when there are no controls.
    pub fn step(&mut self, nav: Navigation, count: usize) -> Option<usize> {
        if count == 0 {
            self.cursor = 0;
            return None;
        }
        let max = count - 1;
        let next = match nav {
            Navigation::Next => self.cursor.saturating_add(1),
            Navigation::Prev => self.cursor.saturating_sub(1),
        };
        self.cursor = if next > max {
            match nav {
                Navigation::Next => 0,
                Navigation::Prev => max,
            }
        } else {
            next
        };
        Some(self.cursor)
    }

    /// Handle a key press against the controls as they are now.
    ///
    /// Tab and Shift+Tab always prevent default navigation; Escape reports
    /// [`FocusOutcome::Close`]; other keys are ignored.
    pub fn handle_key<K: Copy>(&mut self, press: KeyPress, controls: &[K]) -> FocusOutcome<K> {
        match press.key {
            Key::Escape => FocusOutcome::Close,
            Key::Other => FocusOutcome::Ignore,
            Key::Tab => {
                let nav = press.navigation().unwrap_or(Navigation::Next);
                match self.step(nav, controls.len()) {
                    Some(idx) => FocusOutcome::MoveFocus(controls[idx]),
                    None => FocusOutcome::Suppress,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_wraps_to_zero() {
        let mut seq = TabSequencer::new();
        assert_eq!(seq.step(Navigation::Next, 3), Some(1));
        assert_eq!(seq.step(Navigation::Next, 3), Some(2));
        assert_eq!(seq.step(Navigation::Next, 3), Some(0));
    }

    #[test]
    fn backward_clamps_at_zero() {
        let mut seq = TabSequencer::new();
        assert_eq!(seq.step(Navigation::Prev, 3), Some(0));
        assert_eq!(seq.step(Navigation::Next, 3), Some(1));
        assert_eq!(seq.step(Navigation::Prev, 3), Some(0));
        assert_eq!(seq.step(Navigation::Prev, 3), Some(0));
    }

    #[test]
    fn shrinking_list_clamps_cursor() {
        let mut seq = TabSequencer::new();
        seq.step(Navigation::Next, 5);
        seq.step(Navigation::Next, 5);
        seq.step(Navigation::Next, 5);
        assert_eq!(seq.cursor(), 3);
        // Only two controls remain: forward wraps, backward lands on the last one.
        let mut fwd = seq;
        assert_eq!(fwd.step(Navigation::Next, 2), Some(0));
        assert_eq!(seq.step(Navigation::Prev, 2), Some(1));
    }

    #[test]
    fn sync_follows_the_focused_control() {
        let mut seq = TabSequencer::new();
        let controls = ["link", "close", "more"];
        seq.sync_to(&"close", &controls);
        assert_eq!(seq.cursor(), 1);
        assert_eq!(seq.handle_key(KeyPress::TAB, &controls), FocusOutcome::MoveFocus("more"));
        seq.sync_to(&"gone", &controls);
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn empty_list_suppresses() {
        let mut seq = TabSequencer::new();
        let none: [u8; 0] = [];
        assert_eq!(seq.handle_key(KeyPress::TAB, &none), FocusOutcome::Suppress);
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn single_control_keeps_focus() {
        let mut seq = TabSequencer::new();
        assert_eq!(seq.handle_key(KeyPress::TAB, &[9]), FocusOutcome::MoveFocus(9));
        assert_eq!(seq.handle_key(KeyPress::SHIFT_TAB, &[9]), FocusOutcome::MoveFocus(9));
    }

    #[test]
    fn escape_and_other_keys() {
        let mut seq = TabSequencer::new();
        assert_eq!(seq.handle_key(KeyPress::ESCAPE, &[1, 2]), FocusOutcome::Close);
        assert_eq!(
            seq.handle_key(KeyPress::new(Key::Other, crate::Modifiers::SHIFT), &[1, 2]),
            FocusOutcome::Ignore
        );
        assert_eq!(seq.cursor(), 0);
    }
}
