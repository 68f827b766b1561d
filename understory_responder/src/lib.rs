// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Responder: a deterministic, `no_std` router for delegated triggers.
//!
//! ## Overview
//!
//! Many widgets are driven declaratively: an element somewhere in the document
//! says "when I am activated, toggle that drawer". A single delegated listener
//! at the document root receives every activation and has to work out which
//! trigger was meant, what it asks for, and whom it addresses.
//!
//! This crate computes exactly that, and nothing else. It does not listen for
//! events and it does not run actions.
//!
//! ## Inputs
//!
//! Implement [`TriggerLookup`](crate::types::TriggerLookup) for your tree. It answers three questions
//! about a node key `K`:
//!
//! - its parent (for the ancestor walk),
//! - which action [`Markers`](crate::types::Markers) it carries,
//! - which targets it addresses.
//!
//! ## Routing
//!
//! [`TriggerRouter::route`](crate::router::TriggerRouter::route) walks from the activation origin up to the
//! delegation root (both inclusive) and stops at the nearest node carrying any
//! marker. That node is the trigger. The action is picked by priority
//! toggle > close > open, and the targets come from the lookup. A detached router,
//! or an origin outside the delegation root, routes nothing.
//!
//! A matched trigger always prevents the platform's default action (for
//! example following an `href`), even when it addresses nothing.
//!
//! ## Minimal example
//!
//! ```rust
//! use smallvec::{SmallVec, smallvec};
//! use understory_responder::router::TriggerRouter;
//! use understory_responder::types::{Action, Markers, TriggerLookup};
//!
//! // 0 is the root, 1 a toggle button, 2 an icon inside it, 9 a drawer.
//! struct Doc;
//! impl TriggerLookup<u32> for Doc {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         match node {
//!             2 => Some(1),
//!             1 | 9 => Some(0),
//!             _ => None,
//!         }
//!     }
//!     fn markers_of(&self, node: &u32) -> Markers {
//!         if *node == 1 { Markers::TOGGLE } else { Markers::empty() }
//!     }
//!     fn targets_of(&self, _trigger: &u32) -> SmallVec<[u32; 4]> {
//!         smallvec![9]
//!     }
//! }
//!
//! let mut router = TriggerRouter::new();
//! router.attach(0);
//! let route = router.route(&Doc, 2).unwrap();
//! assert_eq!(route.trigger, 1);
//! assert_eq!(route.action, Action::Toggle);
//! assert_eq!(route.targets.as_slice(), &[9]);
//! ```
//!
//! ## Features
//!
//! - `element_tree_adapter`: enables [`adapters::element_tree`], a lookup over an
//!   `understory_element_tree::Tree` driven by `data-*` attributes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod router;
pub mod types;
