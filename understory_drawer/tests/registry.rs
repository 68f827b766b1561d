// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State machine behavior of the drawer registry against a recording host.

mod common;

use common::TestHost;
use understory_drawer::{
    Action, Alignment, DrawerError, DrawerEvent, DrawerOptions, Drawers, Effect, EventKind,
    FocusCycle,
};
use understory_focus::{FocusOutcome, KeyPress};

const RIGHT_A: u32 = 100;
const RIGHT_B: u32 = 200;
const LEFT: u32 = 300;
const TRIGGER: u32 = 1;

fn setup() -> (Drawers<u32>, TestHost) {
    let mut drawers = Drawers::new();
    drawers
        .register(RIGHT_A, DrawerOptions::new(Alignment::Right))
        .unwrap();
    drawers
        .register(RIGHT_B, DrawerOptions::new(Alignment::Right))
        .unwrap();
    drawers
        .register(LEFT, DrawerOptions::new(Alignment::Left).animated(true))
        .unwrap();
    let mut host = TestHost::default()
        .with_drawer(RIGHT_A, &[101, 102, 103], Some(102))
        .with_drawer(RIGHT_B, &[201], None)
        .with_drawer(LEFT, &[301, 302], None);
    host.focused = Some(TRIGGER);
    (drawers, host)
}

#[test]
fn open_notifies_synchronously_and_commits_after_tick() {
    let (mut drawers, mut host) = setup();
    assert_eq!(drawers.open(RIGHT_A, &mut host, 0), Ok(true));
    assert_eq!(
        host.effects,
        [
            Effect::Notify(DrawerEvent {
                kind: EventKind::RightDrawer,
                target: RIGHT_A,
            }),
            Effect::SetVisible {
                element: RIGHT_A,
                visible: true,
            },
            Effect::Notify(DrawerEvent {
                kind: EventKind::Open,
                target: RIGHT_A,
            }),
        ]
    );
    assert!(!host.is_marked(RIGHT_A));
    assert_eq!(drawers.next_deadline(), Some(50));

    assert_eq!(drawers.advance(49, &mut host), 0);
    assert_eq!(drawers.advance(50, &mut host), 1);
    assert!(host.is_marked(RIGHT_A));
    assert_eq!(host.expanded.get(&TRIGGER), Some(&true));
    // The close control is the entry point.
    assert_eq!(host.focused, Some(102));
}

#[test]
fn open_is_idempotent() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    let effects = host.effects.len();
    let focused = host.focused;
    let state = drawers.get(RIGHT_A).unwrap().state();

    assert_eq!(drawers.open(RIGHT_A, &mut host, 60), Ok(false));
    drawers.advance(1_000, &mut host);
    assert_eq!(host.effects.len(), effects);
    assert_eq!(host.focused, focused);
    assert_eq!(drawers.get(RIGHT_A).unwrap().state(), state);
    assert_eq!(host.count(EventKind::Open, RIGHT_A), 1);
}

#[test]
fn close_is_idempotent() {
    let (mut drawers, mut host) = setup();
    assert_eq!(drawers.close(RIGHT_A, &mut host, 0), Ok(false));
    assert!(host.effects.is_empty());
}

#[test]
fn close_before_open_tick_leaves_drawer_hidden() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    drawers.close(RIGHT_A, &mut host, 10).unwrap();
    drawers.advance(1_000, &mut host);
    assert!(!host.is_visible(RIGHT_A));
    assert!(!host.is_marked(RIGHT_A));
    assert!(drawers.scheduler().is_empty());
}

#[test]
fn animated_close_before_open_tick_hides_after_transition() {
    let (mut drawers, mut host) = setup();
    drawers.open(LEFT, &mut host, 0).unwrap();
    drawers.close(LEFT, &mut host, 10).unwrap();
    drawers.advance(409, &mut host);
    assert!(host.is_visible(LEFT));
    assert!(!host.is_marked(LEFT));
    drawers.advance(410, &mut host);
    assert!(!host.is_visible(LEFT));
    assert!(!host.is_marked(LEFT));
}

#[test]
fn animated_drawer_stays_shown_for_the_transition() {
    let (mut drawers, mut host) = setup();
    drawers.open(LEFT, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    drawers.close(LEFT, &mut host, 100).unwrap();
    assert_eq!(host.count(EventKind::Close, LEFT), 1);
    assert!(!host.is_marked(LEFT));

    drawers.advance(499, &mut host);
    assert!(host.is_visible(LEFT));
    drawers.advance(500, &mut host);
    assert!(!host.is_visible(LEFT));
}

#[test]
fn reopen_during_close_transition_keeps_drawer_shown() {
    let (mut drawers, mut host) = setup();
    drawers.open(LEFT, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    drawers.close(LEFT, &mut host, 100).unwrap();
    drawers.open(LEFT, &mut host, 200).unwrap();
    drawers.advance(1_000, &mut host);
    assert!(host.is_visible(LEFT));
    assert!(host.is_marked(LEFT));
}

#[test]
fn same_side_drawer_closes_other_side_survives() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    drawers.open(LEFT, &mut host, 10).unwrap();
    drawers.open(RIGHT_B, &mut host, 20).unwrap();

    assert!(!drawers.is_open(RIGHT_A));
    assert!(drawers.is_open(RIGHT_B));
    assert!(drawers.is_open(LEFT));
    assert_eq!(host.count(EventKind::Close, RIGHT_A), 1);
    assert_eq!(host.count(EventKind::RightDrawer, RIGHT_B), 1);
    assert_eq!(host.count(EventKind::Close, LEFT), 0);
    // Every controller reset its marker after the broadcast.
    for &key in drawers.keys() {
        assert_eq!(drawers.get(key).unwrap().state().current_target, None);
    }
}

#[test]
fn closing_restores_focus_to_trigger() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    assert_eq!(host.focused, Some(102));

    drawers.close(RIGHT_A, &mut host, 100).unwrap();
    assert_eq!(host.focused, Some(TRIGGER));
    assert_eq!(host.expanded.get(&TRIGGER), Some(&false));
}

#[test]
fn closing_leaves_outside_focus_alone() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    host.focused = Some(999);
    drawers.close(RIGHT_A, &mut host, 100).unwrap();
    assert_eq!(host.focused, Some(999));
}

#[test]
fn trap_wraps_at_edges_and_escape_closes() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);

    host.focused = Some(103);
    assert_eq!(
        drawers.handle_key(KeyPress::TAB, &mut host, 60),
        FocusOutcome::MoveFocus(102)
    );
    assert_eq!(host.focused, Some(102));

    assert_eq!(
        drawers.handle_key(KeyPress::SHIFT_TAB, &mut host, 70),
        FocusOutcome::MoveFocus(103)
    );
    assert_eq!(host.focused, Some(103));

    host.focused = Some(101);
    assert_eq!(
        drawers.handle_key(KeyPress::TAB, &mut host, 80),
        FocusOutcome::Ignore
    );

    assert_eq!(
        drawers.handle_key(KeyPress::ESCAPE, &mut host, 90),
        FocusOutcome::Close
    );
    assert!(!drawers.is_open(RIGHT_A));
    assert_eq!(host.focused, Some(TRIGGER));
}

#[test]
fn single_focusable_never_lets_tab_out() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_B, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    assert_eq!(host.focused, Some(201));
    for press in [KeyPress::TAB, KeyPress::SHIFT_TAB] {
        assert_eq!(
            drawers.handle_key(press, &mut host, 60),
            FocusOutcome::Suppress
        );
        assert_eq!(host.focused, Some(201));
    }
}

#[test]
fn keys_outside_open_drawers_are_ignored() {
    let (mut drawers, mut host) = setup();
    assert_eq!(
        drawers.handle_key(KeyPress::ESCAPE, &mut host, 0),
        FocusOutcome::Ignore
    );
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    host.focused = Some(TRIGGER);
    assert_eq!(
        drawers.handle_key(KeyPress::ESCAPE, &mut host, 10),
        FocusOutcome::Ignore
    );
    assert!(drawers.is_open(RIGHT_A));
}

#[test]
fn sequencer_drawer_walks_controls_with_a_cursor() {
    let mut drawers = Drawers::new();
    drawers
        .register(
            500,
            DrawerOptions::new(Alignment::Right).focus_cycle(FocusCycle::Sequencer),
        )
        .unwrap();
    let mut host = TestHost::default().with_drawer(500, &[501, 502, 503], None);
    drawers.open(500, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    assert_eq!(host.focused, Some(501));

    let mut seen = Vec::new();
    for _ in 0..3 {
        drawers.handle_key(KeyPress::TAB, &mut host, 60);
        seen.push(host.focused.unwrap());
    }
    assert_eq!(seen, [502, 503, 501]);
    assert_eq!(
        drawers.handle_key(KeyPress::SHIFT_TAB, &mut host, 70),
        FocusOutcome::MoveFocus(501)
    );

    // Controls are queried on every press.
    host = host.with_drawer(500, &[501, 504], None);
    host.focused = Some(501);
    assert_eq!(
        drawers.handle_key(KeyPress::TAB, &mut host, 80),
        FocusOutcome::MoveFocus(504)
    );
}

#[test]
fn addressing_errors() {
    let (mut drawers, mut host) = setup();
    assert_eq!(
        drawers.open(999, &mut host, 0),
        Err(DrawerError::NotRegistered)
    );
    assert_eq!(
        drawers.toggle(999, &mut host, 0),
        Err(DrawerError::NotRegistered)
    );
    assert_eq!(
        drawers.register(RIGHT_A, DrawerOptions::default()),
        Err(DrawerError::AlreadyRegistered)
    );
    assert!(!drawers.is_open(999));
}

#[test]
fn unregister_cancels_pending_ticks() {
    let (mut drawers, mut host) = setup();
    drawers.open(RIGHT_A, &mut host, 0).unwrap();
    let controller = drawers.unregister(RIGHT_A).unwrap();
    assert!(controller.is_open());
    assert!(drawers.scheduler().is_empty());
    assert_eq!(drawers.advance(1_000, &mut host), 0);
    assert_eq!(drawers.keys(), [RIGHT_B, LEFT]);
    assert!(drawers.unregister(RIGHT_A).is_none());
}

#[test]
fn actions_dispatch() {
    let (mut drawers, mut host) = setup();
    drawers.apply(LEFT, Action::Toggle, &mut host, 0).unwrap();
    assert!(drawers.is_open(LEFT));
    drawers.apply(LEFT, Action::Open, &mut host, 10).unwrap();
    assert!(drawers.is_open(LEFT));
    drawers.apply(LEFT, Action::Toggle, &mut host, 20).unwrap();
    assert!(!drawers.is_open(LEFT));
    assert_eq!(
        drawers.apply(LEFT, Action::Close, &mut host, 30),
        Ok(false)
    );
}

#[test]
fn keys_before_the_open_tick_use_current_content() {
    let mut drawers = Drawers::new();
    drawers
        .register(600, DrawerOptions::new(Alignment::Right))
        .unwrap();
    let mut host = TestHost::default().with_drawer(600, &[601, 602], None);
    host.focused = Some(TRIGGER);
    drawers.open(600, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    drawers.close(600, &mut host, 100).unwrap();
    assert!(drawers.get(600).unwrap().trap().set().is_empty());

    // The content changed while closed.
    host = host.with_drawer(600, &[605], None);
    drawers.open(600, &mut host, 1_000).unwrap();
    host.focused = Some(605);
    assert_eq!(
        drawers.handle_key(KeyPress::TAB, &mut host, 1_010),
        FocusOutcome::Suppress
    );
    assert_eq!(drawers.get(600).unwrap().trap().set().as_slice(), [605]);
}

#[test]
fn sequencer_starts_after_a_close_control_placed_later() {
    let mut drawers = Drawers::new();
    drawers
        .register(
            700,
            DrawerOptions::new(Alignment::Left).focus_cycle(FocusCycle::Sequencer),
        )
        .unwrap();
    let mut host = TestHost::default().with_drawer(700, &[701, 702, 703], Some(702));
    drawers.open(700, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    assert_eq!(host.focused, Some(702));
    assert_eq!(
        drawers.handle_key(KeyPress::TAB, &mut host, 60),
        FocusOutcome::MoveFocus(703)
    );
    assert_eq!(
        drawers.handle_key(KeyPress::SHIFT_TAB, &mut host, 70),
        FocusOutcome::MoveFocus(702)
    );
}

#[test]
fn drawer_without_focusables_takes_focus_itself() {
    let mut drawers = Drawers::new();
    drawers
        .register(800, DrawerOptions::new(Alignment::Right))
        .unwrap();
    let mut host = TestHost::default().with_drawer(800, &[], None);
    host.focused = Some(TRIGGER);
    drawers.open(800, &mut host, 0).unwrap();
    drawers.advance(50, &mut host);
    assert_eq!(host.focused, Some(800));

    assert_eq!(
        drawers.handle_key(KeyPress::TAB, &mut host, 60),
        FocusOutcome::Suppress
    );
    assert_eq!(
        drawers.handle_key(KeyPress::ESCAPE, &mut host, 70),
        FocusOutcome::Close
    );
    assert!(!drawers.is_open(800));
    assert_eq!(host.focused, Some(TRIGGER));
}
