// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries, and focus.

use alloc::vec::Vec;

use crate::selector::{Selector, SelectorError};
use crate::types::{Element, ElementFlags, NodeId};

/// Element tree.
///
/// Nodes are addressed by generational [`NodeId`]s: removing a node makes every
/// copy of its id stale, even if the slot is later reused. The tree also owns
/// the single "active element" (the focused node), which is cleared when that
/// node is removed.
///
/// ## Example
///
/// ```rust
/// use understory_element_tree::{Element, Tag, Tree};
///
/// let mut tree = Tree::new();
/// let body = tree.insert(None, Element::new(Tag::Body));
/// let panel = tree.insert(Some(body), Element::new(Tag::Div).with_id("panel"));
/// let close = tree.insert(
///     Some(panel),
///     Element::new(Tag::Button).with_attr("data-close", "o-drawer"),
/// );
///
/// assert_eq!(tree.get_element_by_id("panel"), Some(panel));
/// assert!(tree.contains(panel, close));
/// assert_eq!(
///     tree.query_selector_all(None, "[data-close]").unwrap(),
///     vec![close]
/// );
/// ```
#[derive(Clone, Default)]
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    focused: Option<NodeId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// Inserting under a stale parent creates a root.
    pub fn insert(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            _ => self.roots.push(id),
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    ///
    /// Clears the active element if it was inside the removed subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` as the last child of `new_parent` (or as a root if `None`).
    ///
    /// Moving a node under its own descendant is ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.contains(id, p))
        {
            return;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
        match new_parent {
            Some(p) => self.link_parent(id, p),
            None => self.roots.push(id),
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Element data of a live node.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Mutable element data of a live node.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_opt_mut(id).map(|n| &mut n.element)
    }

    /// Set the flags of a live node.
    pub fn set_flags(&mut self, id: NodeId, flags: ElementFlags) {
        if let Some(el) = self.element_mut(id) {
            el.flags = flags;
        }
    }

    /// Toggle [`ElementFlags::VISIBLE`] on a live node.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(el) = self.element_mut(id) {
            el.flags.set(ElementFlags::VISIBLE, visible);
        }
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Root nodes in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent_of(n);
        }
        false
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` at the end of the last root or if the current node is stale.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.children_of(current).first() {
            return Some(first_child);
        }
        let mut node = current;
        loop {
            if let Some(next) = self.next_sibling(node) {
                return Some(next);
            }
            match self.parent_of(node) {
                Some(parent) => node = parent,
                None => return None,
            }
        }
    }

    /// Descendants of `root` in document order, excluding `root` itself.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if self.is_alive(root) {
            stack.extend(self.children_of(root).iter().rev().copied());
        }
        Descendants { tree: self, stack }
    }

    /// All live nodes in document order (roots in insertion order).
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            out.push(root);
            out.extend(self.descendants(root));
        }
        out
    }

    /// First element in document order whose `id` equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|&n| self.element(n).and_then(|e| e.id.as_deref()) == Some(id))
    }

    /// Elements matching `selector` in document order.
    ///
    /// With `scope = Some(root)` only descendants of `root` are considered (like
    /// `Element::querySelectorAll`); with `None` the whole document is searched.
    pub fn query_selector_all(
        &self,
        scope: Option<NodeId>,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(scope, &selector))
    }

    /// Like [`Tree::query_selector_all`] with a pre-parsed selector.
    pub fn select(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let candidates: Vec<NodeId> = match scope {
            Some(root) => self.descendants(root).collect(),
            None => self.document_order(),
        };
        candidates
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| selector.matches(e)))
            .collect()
    }

    /// The focused node, if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused.filter(|&f| self.is_alive(f))
    }

    /// Focus a live node; stale ids are ignored.
    pub fn focus(&mut self, id: NodeId) {
        if self.is_alive(id) {
            self.focused = Some(id);
        }
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = match self.parent_of(node) {
            Some(parent) => self.children_of(parent),
            None => &self.roots,
        };
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

/// Pre-order iterator over a subtree, see [`Tree::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        self.stack
            .extend(self.tree.children_of(next).iter().rev().copied());
        Some(next)
    }
}
