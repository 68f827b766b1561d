// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Understory Element Tree.
//!
//! ## Feature
//!
//! Enable with `element_tree_adapter`.
//!
//! ## Attribute protocol
//!
//! A node is a trigger when one of the action attributes (`data-toggle`,
//! `data-close`, `data-open` by default) equals the component name. Its targets
//! are the elements matching the selector in `data-target`, or in `href` when
//! `data-target` is absent or empty. See [`TriggerAttributes`].

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_element_tree::{Element, NodeId, SelectorError, Tree};

use crate::types::{Markers, TriggerLookup};

/// Attribute names and component value that make up the trigger protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerAttributes {
    /// Component name the action attributes must equal.
    pub component: String,
    /// Toggle action attribute.
    pub toggle: String,
    /// Close action attribute.
    pub close: String,
    /// Open action attribute.
    pub open: String,
    /// Primary target attribute.
    pub target: String,
    /// Fallback target attribute.
    pub href: String,
    /// Attribute that registers an element as an instance of the component.
    pub registration: String,
}

impl Default for TriggerAttributes {
    fn default() -> Self {
        Self::for_component("o-drawer")
    }
}

impl TriggerAttributes {
    /// The default attribute names for the given component.
    pub fn for_component(component: &str) -> Self {
        Self {
            component: component.into(),
            toggle: "data-toggle".into(),
            close: "data-close".into(),
            open: "data-open".into(),
            target: "data-target".into(),
            href: "href".into(),
            registration: "data-o-component".into(),
        }
    }

    /// Markers carried by `element`.
    pub fn markers(&self, element: &Element) -> Markers {
        let is = |name: &str| element.attr(name) == Some(self.component.as_str());
        let mut markers = Markers::empty();
        markers.set(Markers::TOGGLE, is(&self.toggle));
        markers.set(Markers::CLOSE, is(&self.close));
        markers.set(Markers::OPEN, is(&self.open));
        markers
    }

    /// Whether `element` registers itself as an instance of the component.
    pub fn is_registered(&self, element: &Element) -> bool {
        element.attr(&self.registration) == Some(self.component.as_str())
    }

    /// Selector a trigger addresses its targets with, if any.
    pub fn target_selector<'e>(&self, element: &'e Element) -> Option<&'e str> {
        element
            .attr(&self.target)
            .filter(|s| !s.is_empty())
            .or_else(|| element.attr(&self.href))
            .filter(|s| !s.is_empty())
    }
}

/// [`TriggerLookup`] over an element tree.
#[derive(Clone, Copy, Debug)]
pub struct ElementTriggers<'a> {
    tree: &'a Tree,
    attributes: &'a TriggerAttributes,
}

impl<'a> ElementTriggers<'a> {
    /// Borrow a tree together with the attribute protocol to read it with.
    pub fn new(tree: &'a Tree, attributes: &'a TriggerAttributes) -> Self {
        Self { tree, attributes }
    }

    /// Resolve the targets of `trigger`, reporting selector errors.
    ///
    /// A trigger with no address resolves to nothing.
    pub fn resolve_targets(&self, trigger: NodeId) -> Result<Vec<NodeId>, SelectorError> {
        let Some(selector) = self
            .tree
            .element(trigger)
            .and_then(|el| self.attributes.target_selector(el))
        else {
            return Ok(Vec::new());
        };
        self.tree.query_selector_all(None, selector)
    }

    /// Toggle triggers addressing the element with `id`, via `href="#id"` or
    /// `data-target="#id"`, in document order.
    pub fn toggles_for(&self, id: &str) -> Vec<NodeId> {
        let attrs = self.attributes;
        let addresses = |value: Option<&str>| {
            value.and_then(|v| v.strip_prefix('#')).is_some_and(|v| v == id)
        };
        self.tree
            .document_order()
            .into_iter()
            .filter(|&n| {
                self.tree.element(n).is_some_and(|el| {
                    el.attr(&attrs.toggle) == Some(attrs.component.as_str())
                        && (addresses(el.attr(&attrs.href)) || addresses(el.attr(&attrs.target)))
                })
            })
            .collect()
    }
}

impl TriggerLookup<NodeId> for ElementTriggers<'_> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.parent_of(*node)
    }

    fn markers_of(&self, node: &NodeId) -> Markers {
        self.tree
            .element(*node)
            .map(|el| self.attributes.markers(el))
            .unwrap_or_default()
    }

    fn targets_of(&self, trigger: &NodeId) -> SmallVec<[NodeId; 4]> {
        self.resolve_targets(*trigger)
            .map(SmallVec::from_vec)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::TriggerRouter;
    use crate::types::Action;
    use understory_element_tree::Tag;

    struct Doc {
        tree: Tree,
        body: NodeId,
        drawer: NodeId,
        toggle: NodeId,
        icon: NodeId,
        by_target: NodeId,
        broken: NodeId,
    }

    fn doc() -> Doc {
        let mut tree = Tree::new();
        let body = tree.insert(None, Element::new(Tag::Body));
        let drawer = tree.insert(
            Some(body),
            Element::new(Tag::Div)
                .with_id("nav")
                .with_attr("data-o-component", "o-drawer"),
        );
        let toggle = tree.insert(
            Some(body),
            Element::new(Tag::Anchor)
                .with_attr("data-toggle", "o-drawer")
                .with_attr("href", "#nav"),
        );
        let icon = tree.insert(Some(toggle), Element::new(Tag::Span));
        let by_target = tree.insert(
            Some(body),
            Element::new(Tag::Button)
                .with_attr("data-toggle", "o-drawer")
                .with_attr("data-target", "#nav")
                .with_attr("href", "#elsewhere"),
        );
        let broken = tree.insert(
            Some(body),
            Element::new(Tag::Button)
                .with_attr("data-open", "o-drawer")
                .with_attr("data-target", "#nav >"),
        );
        Doc {
            tree,
            body,
            drawer,
            toggle,
            icon,
            by_target,
            broken,
        }
    }

    #[test]
    fn routes_from_nested_origin() {
        let d = doc();
        let attrs = TriggerAttributes::default();
        let lookup = ElementTriggers::new(&d.tree, &attrs);
        let mut router = TriggerRouter::new();
        router.attach(d.body);
        let route = router.route(&lookup, d.icon).unwrap();
        assert_eq!(route.trigger, d.toggle);
        assert_eq!(route.action, Action::Toggle);
        assert_eq!(route.targets.as_slice(), &[d.drawer]);
    }

    #[test]
    fn data_target_wins_over_href() {
        let d = doc();
        let attrs = TriggerAttributes::default();
        let lookup = ElementTriggers::new(&d.tree, &attrs);
        assert_eq!(lookup.targets_of(&d.by_target).as_slice(), &[d.drawer]);
    }

    #[test]
    fn invalid_selector_yields_no_targets() {
        let d = doc();
        let attrs = TriggerAttributes::default();
        let lookup = ElementTriggers::new(&d.tree, &attrs);
        assert!(lookup.resolve_targets(d.broken).is_err());
        assert!(lookup.targets_of(&d.broken).is_empty());
        assert_eq!(lookup.markers_of(&d.broken), Markers::OPEN);
    }

    #[test]
    fn other_component_values_are_not_markers() {
        let mut d = doc();
        d.tree
            .element_mut(d.toggle)
            .unwrap()
            .set_attr("data-toggle", "o-collapse");
        let attrs = TriggerAttributes::default();
        let lookup = ElementTriggers::new(&d.tree, &attrs);
        assert!(lookup.markers_of(&d.toggle).is_empty());
        assert!(attrs.is_registered(d.tree.element(d.drawer).unwrap()));
    }

    #[test]
    fn toggles_for_matches_href_and_data_target() {
        let d = doc();
        let attrs = TriggerAttributes::default();
        let lookup = ElementTriggers::new(&d.tree, &attrs);
        assert_eq!(lookup.toggles_for("nav"), [d.toggle, d.by_target]);
        assert!(lookup.toggles_for("missing").is_empty());
    }
}
