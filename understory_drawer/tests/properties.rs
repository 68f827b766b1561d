// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for registry invariants under arbitrary operation sequences:
//! 1. At most one drawer per side is open.
//! 2. The open marker is only ever present on an open drawer.
//! 3. Once deferred work settles, open drawers are shown and marked and
//!    closed drawers are hidden and unmarked.
//! 4. The tab sequencer's cursor stays in bounds.

mod common;

use common::TestHost;
use proptest::prelude::*;
use understory_drawer::{Alignment, DrawerOptions, Drawers, EventKind};
use understory_focus::{KeyPress, Navigation, TabSequencer};

const KEYS: [u32; 4] = [100, 200, 300, 400];

#[derive(Clone, Debug)]
enum Op {
    Open(usize),
    Close(usize),
    Toggle(usize),
    Key(KeyPress),
    Wait(u64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..KEYS.len()).prop_map(Op::Open),
        (0..KEYS.len()).prop_map(Op::Close),
        (0..KEYS.len()).prop_map(Op::Toggle),
        prop_oneof![
            Just(KeyPress::TAB),
            Just(KeyPress::SHIFT_TAB),
            Just(KeyPress::ESCAPE),
        ]
        .prop_map(Op::Key),
        (0_u64..120).prop_map(Op::Wait),
    ]
}

fn setup() -> (Drawers<u32>, TestHost) {
    let mut drawers = Drawers::new();
    drawers
        .register(100, DrawerOptions::new(Alignment::Right))
        .unwrap();
    drawers
        .register(200, DrawerOptions::new(Alignment::Right).animated(true))
        .unwrap();
    drawers
        .register(300, DrawerOptions::new(Alignment::Left))
        .unwrap();
    drawers
        .register(400, DrawerOptions::new(Alignment::Left).animated(true))
        .unwrap();
    let mut host = TestHost::default();
    for key in KEYS {
        host = host.with_drawer(key, &[key + 1, key + 2, key + 3], Some(key + 2));
    }
    (drawers, host)
}

fn open_on(drawers: &Drawers<u32>, alignment: Alignment) -> usize {
    drawers
        .keys()
        .iter()
        .filter(|&&k| drawers.is_open(k))
        .filter(|&&k| drawers.get(k).is_some_and(|c| c.alignment() == alignment))
        .count()
}

proptest! {
    #[test]
    fn invariants_hold_under_any_sequence(ops in prop::collection::vec(arb_op(), 1..60)) {
        let (mut drawers, mut host) = setup();
        let mut now = 0_u64;
        let mut opened = 0_usize;
        for op in ops {
            match op {
                Op::Open(i) => {
                    if drawers.open(KEYS[i], &mut host, now).unwrap() {
                        opened += 1;
                    }
                }
                Op::Close(i) => {
                    drawers.close(KEYS[i], &mut host, now).unwrap();
                }
                Op::Toggle(i) => {
                    let was_open = drawers.is_open(KEYS[i]);
                    drawers.toggle(KEYS[i], &mut host, now).unwrap();
                    if !was_open {
                        opened += 1;
                    }
                }
                Op::Key(press) => {
                    drawers.handle_key(press, &mut host, now);
                }
                Op::Wait(dt) => {
                    now += dt;
                    drawers.advance(now, &mut host);
                }
            }

            prop_assert!(open_on(&drawers, Alignment::Right) <= 1);
            prop_assert!(open_on(&drawers, Alignment::Left) <= 1);
            for key in KEYS {
                if host.is_marked(key) {
                    prop_assert!(drawers.is_open(key));
                }
                if drawers.is_open(key) {
                    prop_assert!(host.is_visible(key));
                }
            }
        }

        let opens: usize = KEYS.iter().map(|&k| host.count(EventKind::Open, k)).sum();
        prop_assert_eq!(opens, opened);

        now += 1_000;
        drawers.advance(now, &mut host);
        prop_assert!(drawers.scheduler().is_empty());
        for key in KEYS {
            let open = drawers.is_open(key);
            prop_assert_eq!(host.is_visible(key), open);
            prop_assert_eq!(host.is_marked(key), open);
        }
    }

    #[test]
    fn open_twice_is_open_once(i in 0..KEYS.len(), gap in 0_u64..200) {
        let (mut drawers, mut host) = setup();
        prop_assert!(drawers.open(KEYS[i], &mut host, 0).unwrap());
        drawers.advance(gap, &mut host);
        let effects = host.effects.len();
        prop_assert!(!drawers.open(KEYS[i], &mut host, gap).unwrap());
        prop_assert_eq!(host.effects.len(), effects);
    }

    #[test]
    fn sequencer_cursor_stays_in_bounds(
        steps in prop::collection::vec((any::<bool>(), 0_usize..6), 1..40),
    ) {
        let mut seq = TabSequencer::new();
        for (forward, count) in steps {
            let nav = if forward { Navigation::Next } else { Navigation::Prev };
            match seq.step(nav, count) {
                Some(idx) => {
                    prop_assert!(idx < count);
                    prop_assert_eq!(seq.cursor(), idx);
                }
                None => {
                    prop_assert_eq!(count, 0);
                    prop_assert_eq!(seq.cursor(), 0);
                }
            }
        }
    }
}
