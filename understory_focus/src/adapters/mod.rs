// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag to keep the core focus crate
//! lightweight and `no_std` by default.
//!
//! ## Available Adapters
//!
//! - [`element_tree`] (`element_tree_adapter` feature): derive [`FocusProps`](crate::FocusProps)
//!   from elements and build focusable sets and sequencer control lists from an
//!   [`understory_element_tree::Tree`] subtree.

#[cfg(feature = "element_tree_adapter")]
pub mod element_tree;
