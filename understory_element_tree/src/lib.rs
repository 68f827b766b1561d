// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Element Tree: a small, headless stand-in for a document.
//!
//! Widgets such as drawers, menus and dialogs are usually specified against a
//! DOM: they look up elements by id or selector, read and write attributes and
//! classes, toggle visibility and move focus. This crate provides exactly that
//! surface, and nothing more, so such widgets can be built and tested without a
//! browser.
//!
//! - [`Tree`]: container of elements with generational [`NodeId`] handles,
//!   document-order traversal, inclusive [`Tree::contains`], and a single active
//!   (focused) element.
//! - [`Element`]: tag, `id`, class list, attributes and [`ElementFlags`].
//! - [`Selector`]: comma-separated compound selectors (`tag`, `#id`, `.class`,
//!   `[attr]`, `[attr=value]`) used by [`Tree::query_selector_all`].
//!
//! ## Not a layout engine
//!
//! There is no geometry here. Visibility is a single flag
//! ([`ElementFlags::VISIBLE`]), which is all the "display" state interaction
//! code needs to observe.
//!
//! ## Example
//!
//! ```rust
//! use understory_element_tree::{Element, ElementFlags, Tag, Tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.insert(None, Element::new(Tag::Body));
//! let button = tree.insert(
//!     Some(body),
//!     Element::new(Tag::Button).with_flags(ElementFlags::VISIBLE | ElementFlags::DISABLED),
//! );
//!
//! tree.focus(button);
//! assert_eq!(tree.active_element(), Some(button));
//! assert!(tree.element(button).unwrap().is_disabled());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod selector;
mod tree;
mod types;

pub use selector::{Selector, SelectorError};
pub use tree::{Descendants, Tree};
pub use types::{Element, ElementFlags, NodeId, Tag};
