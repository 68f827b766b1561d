// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vanilla binding over an element tree.
//!
//! [`DrawerDocument`] owns a [`Tree`], the drawer registry and a delegated
//! [`TriggerRouter`]. Drawers are plain elements marked with classes, and
//! triggers are elements carrying `data-toggle`, `data-close` or `data-open`
//! attributes (see [`TriggerAttributes`]).
//!
//! ```
//! use understory_drawer::document::DrawerDocument;
//! use understory_element_tree::{Element, Tag, Tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.insert(None, Element::new(Tag::Body));
//! let drawer = tree.insert(
//!     Some(body),
//!     Element::new(Tag::Div)
//!         .with_id("nav")
//!         .with_attr("data-o-component", "o-drawer"),
//! );
//! let trigger = tree.insert(
//!     Some(body),
//!     Element::new(Tag::Button)
//!         .with_attr("data-toggle", "o-drawer")
//!         .with_attr("data-target", "#nav"),
//! );
//!
//! let mut doc = DrawerDocument::new(tree);
//! assert_eq!(doc.init(None).unwrap(), [drawer]);
//!
//! doc.click(trigger, 0);
//! assert!(doc.is_open(drawer));
//! doc.advance(50);
//! let trigger_el = doc.tree().element(trigger).unwrap();
//! assert_eq!(trigger_el.attr("aria-expanded"), Some("true"));
//! ```

use alloc::string::ToString;
use alloc::vec::Vec;
use core::mem;

use tracing::{debug, trace, warn};
use understory_element_tree::{NodeId, Tag, Tree};
use understory_focus::adapters::element_tree as focus_adapter;
use understory_focus::{FocusCycle, FocusOutcome, FocusableSet, KeyPress};
use understory_responder::adapters::element_tree::{ElementTriggers, TriggerAttributes};
use understory_responder::router::TriggerRouter;
use understory_responder::types::Route;

use crate::error::DrawerError;
use crate::host::DrawerHost;
use crate::registry::Drawers;
use crate::types::{Alignment, DrawerEvent, DrawerOptions, Effect, Timings};

/// Class every drawer element carries.
pub const DRAWER_CLASS: &str = "o-drawer";
/// Class marking an animated drawer.
pub const ANIMATED_CLASS: &str = "o-drawer-animated";
/// Open marker class.
pub const OPEN_CLASS: &str = "o-drawer-open";
/// Expanded indicator attribute.
pub const EXPANDED_ATTR: &str = "aria-expanded";

/// Drawers living in an element tree.
#[derive(Clone, Debug)]
pub struct DrawerDocument {
    tree: Tree,
    drawers: Drawers<NodeId>,
    router: TriggerRouter<NodeId>,
    attributes: TriggerAttributes,
    focus_cycle: FocusCycle,
    events: Vec<DrawerEvent<NodeId>>,
}

impl DrawerDocument {
    /// Wrap a tree, with default timings and the `o-drawer` attribute protocol.
    pub fn new(tree: Tree) -> Self {
        Self::with_timings(tree, Timings::default())
    }

    /// Wrap a tree with custom timings.
    pub fn with_timings(tree: Tree, timings: Timings) -> Self {
        Self {
            tree,
            drawers: Drawers::with_timings(timings),
            router: TriggerRouter::new(),
            attributes: TriggerAttributes::default(),
            focus_cycle: FocusCycle::Trap,
            events: Vec::new(),
        }
    }

    /// Builder: use a different attribute protocol.
    pub fn with_attributes(mut self, attributes: TriggerAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder: focus-cycling algorithm for drawers constructed from now on.
    pub fn with_focus_cycle(mut self, focus_cycle: FocusCycle) -> Self {
        self.focus_cycle = focus_cycle;
        self
    }

    /// The tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the tree, for content changes.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The registry.
    pub fn drawers(&self) -> &Drawers<NodeId> {
        &self.drawers
    }

    /// The delegated router.
    pub fn router(&self) -> &TriggerRouter<NodeId> {
        &self.router
    }

    /// Whether the drawer on `node` is open.
    pub fn is_open(&self, node: NodeId) -> bool {
        self.drawers.is_open(node)
    }

    /// Signals dispatched so far.
    pub fn events(&self) -> &[DrawerEvent<NodeId>] {
        &self.events
    }

    /// Drain the signals dispatched so far.
    pub fn take_events(&mut self) -> Vec<DrawerEvent<NodeId>> {
        mem::take(&mut self.events)
    }

    /// Element delegated listeners attach to: the `body` root, else the first root.
    pub fn delegation_root(&self) -> Option<NodeId> {
        let roots = self.tree.roots();
        roots
            .iter()
            .copied()
            .find(|&r| self.tree.element(r).is_some_and(|e| e.tag == Tag::Body))
            .or_else(|| roots.first().copied())
    }

    /// Turn `node` into a closed drawer.
    ///
    /// Adds the drawer class (and the left alignment class when no alignment
    /// class is present), marks it collapsed and hidden, and registers it. The
    /// delegated router is attached on first use.
    pub fn construct(&mut self, node: NodeId) -> Result<NodeId, DrawerError> {
        if self.drawers.is_registered(node) {
            return Err(DrawerError::AlreadyRegistered);
        }
        let focus_cycle = self.focus_cycle;
        let element = self
            .tree
            .element_mut(node)
            .ok_or(DrawerError::MissingElement)?;
        element.add_class(DRAWER_CLASS);
        let alignment = if element.has_class(Alignment::Right.class()) {
            Alignment::Right
        } else {
            if !element.has_class(Alignment::Left.class()) {
                element.add_class(Alignment::Left.class());
            }
            Alignment::Left
        };
        let options = DrawerOptions::new(alignment)
            .animated(element.has_class(ANIMATED_CLASS))
            .focus_cycle(focus_cycle);
        element.set_attr(EXPANDED_ATTR, "false");
        self.tree.set_visible(node, false);
        self.drawers.register(node, options)?;

        if !self.router.is_attached()
            && let Some(root) = self.delegation_root()
        {
            self.router.attach(root);
            debug!(?root, "attached trigger router");
        }
        Ok(node)
    }

    /// Construct the first element matching `selector`.
    pub fn construct_selector(&mut self, selector: &str) -> Result<NodeId, DrawerError> {
        let node = self.first_match(selector)?;
        self.construct(node)
    }

    /// Construct every unregistered element inside `scope` (the delegation root
    /// by default) that carries the registration marker.
    ///
    /// Returns the newly constructed drawers in document order.
    pub fn init(&mut self, scope: Option<NodeId>) -> Result<Vec<NodeId>, DrawerError> {
        let scope = match scope {
            Some(node) if self.tree.is_alive(node) => node,
            Some(_) => return Err(DrawerError::MissingElement),
            None => self.delegation_root().ok_or(DrawerError::MissingElement)?,
        };
        let candidates: Vec<NodeId> = self
            .tree
            .descendants(scope)
            .filter(|&n| {
                self.tree
                    .element(n)
                    .is_some_and(|e| self.attributes.is_registered(e))
            })
            .collect();
        let mut constructed = Vec::new();
        for node in candidates {
            if !self.drawers.is_registered(node) {
                constructed.push(self.construct(node)?);
            }
        }
        Ok(constructed)
    }

    /// [`DrawerDocument::init`] scoped to the first element matching `selector`.
    pub fn init_selector(&mut self, selector: &str) -> Result<Vec<NodeId>, DrawerError> {
        let scope = self.first_match(selector)?;
        self.init(Some(scope))
    }

    /// Toggle triggers addressing the drawer on `node` by id.
    pub fn triggers_for(&self, node: NodeId) -> Vec<NodeId> {
        let Some(id) = self.tree.element(node).and_then(|e| e.id.as_deref()) else {
            return Vec::new();
        };
        ElementTriggers::new(&self.tree, &self.attributes).toggles_for(id)
    }

    /// Activate `node` (a click or equivalent).
    ///
    /// Returns the route when `node` is inside a trigger; the caller should then
    /// prevent the default action. The trigger takes focus, targets that carry
    /// the registration marker but are not drawers yet are constructed, and
    /// every drawer target receives the action.
    pub fn click(&mut self, node: NodeId, now: u64) -> Option<Route<NodeId>> {
        let lookup = ElementTriggers::new(&self.tree, &self.attributes);
        let route = self.router.route(&lookup, node)?;
        if route.targets.is_empty() {
            match lookup.resolve_targets(route.trigger) {
                Err(err) => warn!(trigger = ?route.trigger, %err, "invalid trigger target"),
                Ok(_) => debug!(trigger = ?route.trigger, "trigger addresses nothing"),
            }
        }
        debug!(trigger = ?route.trigger, action = ?route.action, targets = route.targets.len(), "routed click");

        self.tree.focus(route.trigger);
        for &target in &route.targets {
            if !self.drawers.is_registered(target) {
                let marked = self
                    .tree
                    .element(target)
                    .is_some_and(|e| self.attributes.is_registered(e));
                if !marked || self.construct(target).is_err() {
                    continue;
                }
            }
            let mut host = TreeHost::new(&mut self.tree, &mut self.events);
            if let Err(err) = self.drawers.apply(target, route.action, &mut host, now) {
                warn!(?target, %err, "drawer action failed");
            }
        }
        Some(route)
    }

    /// Handle a key press on the focused element.
    pub fn key_down(&mut self, press: KeyPress, now: u64) -> FocusOutcome<NodeId> {
        let mut host = TreeHost::new(&mut self.tree, &mut self.events);
        self.drawers.handle_key(press, &mut host, now)
    }

    /// Run deferred work due at `now`.
    pub fn advance(&mut self, now: u64) -> usize {
        let mut host = TreeHost::new(&mut self.tree, &mut self.events);
        self.drawers.advance(now, &mut host)
    }

    /// Open the drawer on `node`.
    pub fn open(&mut self, node: NodeId, now: u64) -> Result<bool, DrawerError> {
        let mut host = TreeHost::new(&mut self.tree, &mut self.events);
        self.drawers.open(node, &mut host, now)
    }

    /// Close the drawer on `node`.
    pub fn close(&mut self, node: NodeId, now: u64) -> Result<bool, DrawerError> {
        let mut host = TreeHost::new(&mut self.tree, &mut self.events);
        self.drawers.close(node, &mut host, now)
    }

    /// Toggle the drawer on `node`.
    pub fn toggle(&mut self, node: NodeId, now: u64) -> Result<bool, DrawerError> {
        let mut host = TreeHost::new(&mut self.tree, &mut self.events);
        self.drawers.toggle(node, &mut host, now)
    }

    /// Forget the drawer on `node`, leaving its element as it is.
    pub fn unregister(&mut self, node: NodeId) -> bool {
        self.drawers.unregister(node).is_some()
    }

    /// Detach the delegated router; drawers stay registered and scriptable.
    pub fn destroy(&mut self) {
        self.router.detach();
        debug!("detached trigger router");
    }

    fn first_match(&self, selector: &str) -> Result<NodeId, DrawerError> {
        self.tree
            .query_selector_all(None, selector)?
            .first()
            .copied()
            .ok_or_else(|| DrawerError::SelectorNoMatch(selector.to_string()))
    }
}

/// [`DrawerHost`] writing straight into a tree.
struct TreeHost<'a> {
    tree: &'a mut Tree,
    events: &'a mut Vec<DrawerEvent<NodeId>>,
}

impl<'a> TreeHost<'a> {
    fn new(tree: &'a mut Tree, events: &'a mut Vec<DrawerEvent<NodeId>>) -> Self {
        Self { tree, events }
    }

    fn set_expanded(&mut self, node: NodeId, expanded: bool) {
        if let Some(el) = self.tree.element_mut(node) {
            el.set_attr(EXPANDED_ATTR, if expanded { "true" } else { "false" });
        }
    }
}

impl DrawerHost<NodeId> for TreeHost<'_> {
    fn active_element(&self) -> Option<NodeId> {
        self.tree.active_element()
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.contains(ancestor, node)
    }

    fn focusables(&self, drawer: NodeId) -> FocusableSet<NodeId> {
        focus_adapter::focusable_set(self.tree, drawer)
    }

    fn sequencer_controls(&self, drawer: NodeId) -> Vec<NodeId> {
        focus_adapter::sequencer_controls(self.tree, drawer)
    }

    fn apply(&mut self, effect: Effect<NodeId>) {
        match effect {
            Effect::SetVisible { element, visible } => self.tree.set_visible(element, visible),
            Effect::SetOpenMarker { element, open } => {
                if let Some(el) = self.tree.element_mut(element) {
                    if open {
                        el.add_class(OPEN_CLASS);
                    } else {
                        el.remove_class(OPEN_CLASS);
                    }
                }
                self.set_expanded(element, open);
            }
            Effect::SetExpanded { element, expanded } => self.set_expanded(element, expanded),
            Effect::Focus(node) => self.tree.focus(node),
            Effect::Notify(event) => {
                trace!(name = event.name(), target = ?event.target, "dispatch");
                self.events.push(event);
            }
        }
    }
}
