// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drawer: a headless slide-in drawer engine.
//!
//! ## Overview
//!
//! A drawer is a panel that slides in from the left or right edge, keeps
//! keyboard focus inside itself while open, and hands focus back to whatever
//! opened it when it closes. This crate implements that interaction model
//! without a browser:
//!
//! - [`Drawers`]: the registry and state machine. It opens, closes and toggles
//!   drawers, enforces that at most one drawer per side is open, and runs
//!   deferred visual ticks on a host-driven clock.
//! - [`DrawerHost`]: the seam to a document. The engine reads the focused
//!   element and focusable content through it and writes [`Effect`]s to it.
//! - [`views`]: master/detail content routing for drawers that show a list of
//!   basic views leading to detail views.
//! - [`panel`]: a declarative panel for framework integrations, whose open
//!   state is owned by the application and whose transitions return effects.
//! - [`document`] (feature `document`): a ready-made binding over an
//!   `understory_element_tree::Tree`, driven by `data-*` trigger attributes.
//!
//! ## Timing
//!
//! Opening makes a drawer visible at once and applies the open marker and focus
//! after [`Timings::open_delay_ms`]. Closing an animated drawer hides it after
//! [`Timings::close_transition_ms`]. Hosts pass a monotonic millisecond
//! timestamp to every call and call [`Drawers::advance`] as time passes. Each
//! transition bumps the drawer's epoch, so a tick scheduled before a later
//! transition is dropped: the last transition always wins.
//!
//! ## Alignment exclusion
//!
//! Opening a drawer broadcasts its side's signal (`o.Drawer.LeftDrawer` or
//! `o.Drawer.RightDrawer`) to every registered drawer in registration order.
//! Any other open drawer on the same side closes.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_drawer::{Alignment, DrawerHost, DrawerOptions, Drawers, Effect};
//! use understory_focus::FocusableSet;
//!
//! #[derive(Default)]
//! struct Log(Vec<Effect<u32>>);
//!
//! impl DrawerHost<u32> for Log {
//!     fn active_element(&self) -> Option<u32> { None }
//!     fn contains(&self, a: u32, n: u32) -> bool { a == n }
//!     fn focusables(&self, _: u32) -> FocusableSet<u32> { FocusableSet::default() }
//!     fn sequencer_controls(&self, _: u32) -> Vec<u32> { Vec::new() }
//!     fn apply(&mut self, effect: Effect<u32>) { self.0.push(effect); }
//! }
//!
//! let mut drawers = Drawers::new();
//! drawers.register(1, DrawerOptions::new(Alignment::Right)).unwrap();
//! drawers.register(2, DrawerOptions::new(Alignment::Right)).unwrap();
//!
//! let mut host = Log::default();
//! drawers.open(1, &mut host, 0).unwrap();
//! drawers.open(2, &mut host, 10).unwrap();
//! // Same side: opening 2 closed 1.
//! assert!(!drawers.is_open(1));
//! assert!(drawers.is_open(2));
//! ```
//!
//! ## Features
//!
//! - `document` (default): [`document::DrawerDocument`] and the element tree
//!   adapters of `understory_focus` and `understory_responder`.
//! - `serde`: derives `Serialize`/`Deserialize` for configuration types.
//! - `std`: enables `std` support in dependencies.
//!
//! This crate is `no_std` and uses `alloc`. It logs through `tracing` and
//! installs no subscriber.

#![no_std]

extern crate alloc;

pub mod controller;
#[cfg(feature = "document")]
pub mod document;
pub mod panel;
pub mod scheduler;
pub mod views;

mod error;
mod host;
mod registry;
mod types;

pub use error::{DrawerError, ViewError};
pub use host::DrawerHost;
pub use registry::Drawers;
pub use types::{
    Alignment, DrawerEvent, DrawerOptions, DrawerState, Effect, EventKind, Timings,
};
pub use understory_focus::FocusCycle;
pub use understory_responder::types::Action;
