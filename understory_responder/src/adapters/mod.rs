// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag to keep the core responder
//! lightweight and `no_std` by default.
//!
//! ## Available Adapters
//!
//! - [`element_tree`] (`element_tree_adapter` feature): a [`TriggerLookup`](crate::types::TriggerLookup)
//!   over [`understory_element_tree`] that reads action markers and target
//!   selectors from `data-*` attributes.

#[cfg(feature = "element_tree_adapter")]
pub mod element_tree;
