// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, tags, and element data.

use alloc::string::{String, ToString};
use smallvec::SmallVec;

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility and interactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is displayed (the `display: none` toggle).
        const VISIBLE  = 0b0000_0001;
        /// Form control is disabled.
        const DISABLED = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Element tag.
///
/// Only the tags that matter for focus and activation are spelled out; everything
/// else is carried as [`Tag::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `body`
    Body,
    /// `div`
    Div,
    /// `span`
    Span,
    /// `a`
    Anchor,
    /// `button`
    Button,
    /// `input`
    Input,
    /// `select`
    Select,
    /// `textarea`
    TextArea,
    /// Any other tag, stored lowercase.
    Other(String),
}

impl Tag {
    /// Parse a tag name (case-insensitive).
    pub fn parse(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "body" => Self::Body,
            "div" => Self::Div,
            "span" => Self::Span,
            "a" => Self::Anchor,
            "button" => Self::Button,
            "input" => Self::Input,
            "select" => Self::Select,
            "textarea" => Self::TextArea,
            _ => Self::Other(lower),
        }
    }

    /// Lowercase tag name.
    pub fn name(&self) -> &str {
        match self {
            Self::Body => "body",
            Self::Div => "div",
            Self::Span => "span",
            Self::Anchor => "a",
            Self::Button => "button",
            Self::Input => "input",
            Self::Select => "select",
            Self::TextArea => "textarea",
            Self::Other(name) => name,
        }
    }
}

/// Per-element data: tag, identity, classes, attributes, and flags.
///
/// The `id` and `class` attributes are stored in dedicated fields rather than in
/// [`Element::attributes`]; [`Element::attr`] still answers for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Tag of this element.
    pub tag: Tag,
    /// Optional `id`.
    pub id: Option<String>,
    /// Class list in insertion order, without duplicates.
    pub classes: SmallVec<[String; 4]>,
    /// Remaining attributes as `(name, value)` pairs in insertion order.
    pub attributes: SmallVec<[(String, String); 4]>,
    /// Visibility and interactivity flags.
    pub flags: ElementFlags,
}

impl Element {
    /// Create an element with the given tag and default flags.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: SmallVec::new(),
            attributes: SmallVec::new(),
            flags: ElementFlags::default(),
        }
    }

    /// Builder: set the `id`.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Builder: add a class.
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: set flags.
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self
                .attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Whether the attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        match name {
            "class" => !self.classes.is_empty(),
            _ => self.attr(name).is_some(),
        }
    }

    /// Set (or replace) an attribute value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes.clear();
                for class in value.split_ascii_whitespace() {
                    self.add_class(class);
                }
            }
            _ => {
                if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| n == name) {
                    slot.1 = value.to_string();
                } else {
                    self.attributes.push((name.to_string(), value.to_string()));
                }
            }
        }
    }

    /// Remove an attribute; returns whether it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match name {
            "id" => self.id.take().is_some(),
            "class" => {
                let had = !self.classes.is_empty();
                self.classes.clear();
                had
            }
            _ => {
                let before = self.attributes.len();
                self.attributes.retain(|(n, _)| n != name);
                before != self.attributes.len()
            }
        }
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if it is not already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class; returns whether it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    /// Parsed `tabindex`, if present and numeric.
    pub fn tab_index(&self) -> Option<i32> {
        self.attr("tabindex").and_then(|v| v.trim().parse().ok())
    }

    /// Whether the element is displayed.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(ElementFlags::VISIBLE)
    }

    /// Whether the element is disabled.
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ElementFlags::DISABLED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_set_replace_remove() {
        let mut el = Element::new(Tag::Button).with_attr("data-target", "#foo");
        assert_eq!(el.attr("data-target"), Some("#foo"));
        el.set_attr("data-target", "#bar");
        assert_eq!(el.attr("data-target"), Some("#bar"));
        assert_eq!(el.attributes.len(), 1);
        assert!(el.remove_attr("data-target"));
        assert!(!el.has_attr("data-target"));
        assert!(!el.remove_attr("data-target"));
    }

    #[test]
    fn id_and_class_are_routed_to_fields() {
        let mut el = Element::new(Tag::Div);
        el.set_attr("id", "panel");
        el.set_attr("class", "o-drawer  o-drawer-left o-drawer");
        assert_eq!(el.id.as_deref(), Some("panel"));
        assert_eq!(el.attr("id"), Some("panel"));
        assert_eq!(el.classes.len(), 2);
        assert!(el.has_class("o-drawer-left"));
        assert!(el.remove_class("o-drawer"));
        assert!(!el.has_class("o-drawer"));
    }

    #[test]
    fn tab_index_parses_numbers_only() {
        assert_eq!(Element::new(Tag::Div).with_attr("tabindex", "0").tab_index(), Some(0));
        assert_eq!(Element::new(Tag::Div).with_attr("tabindex", "-1").tab_index(), Some(-1));
        assert_eq!(Element::new(Tag::Div).with_attr("tabindex", "x").tab_index(), None);
    }

    #[test]
    fn tag_parse_is_case_insensitive() {
        assert_eq!(Tag::parse("BUTTON"), Tag::Button);
        assert_eq!(Tag::parse("h3"), Tag::Other("h3".into()));
        assert_eq!(Tag::parse("A").name(), "a");
    }
}
