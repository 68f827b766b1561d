// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;

#[cfg(feature = "document")]
use understory_element_tree::SelectorError;

/// Errors reported by drawer construction and registry operations.
///
/// State transitions themselves never fail; only addressing and construction do.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawerError {
    /// The element to build a drawer on does not exist.
    #[error("missing required argument: element")]
    MissingElement,
    /// The key has no registered drawer.
    #[error("no drawer is registered for this element")]
    NotRegistered,
    /// The key already has a registered drawer.
    #[error("a drawer is already registered for this element")]
    AlreadyRegistered,
    /// A selector matched no element.
    #[error("selector {0:?} matched no element")]
    SelectorNoMatch(String),
    /// A selector failed to parse.
    #[cfg(feature = "document")]
    #[error(transparent)]
    InvalidSelector(#[from] SelectorError),
    /// A required configuration property is empty.
    #[error("missing required property `{0}`")]
    MissingProp(&'static str),
}

/// Problems found when validating master/detail content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A basic view references a detail view that does not exist.
    #[error("no detail view with id {0}")]
    UnresolvedDetail(String),
    /// More than one detail view carries the same id.
    #[error("duplicate detail view id {0}")]
    DuplicateDetail(String),
}
