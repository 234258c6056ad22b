// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node storage, topology, and the item registry.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::Rect;
use tracing::{debug, trace};

use crate::geometry::{contains, quadrants};
use crate::types::{Bounded, NodeId, QuadTreeOptions};

/// Dynamic region quadtree over items that report their own bounds.
///
/// The tree covers a fixed rectangle. Nodes subdivide lazily into four equal quadrants
/// while their area stays at or above [`QuadTreeOptions::min_area`], and each item lives in
/// the smallest node that fully contains its box. Items outside the covered rectangle are
/// kept as *pending* and retried on every [`QuadTree::update`].
///
/// The tree holds clones of the items (usually cheap handles) and asks them for their
/// bounds on demand. Items must be removed with [`QuadTree::remove`] before their owner
/// discards them.
pub struct QuadTree<K> {
    nodes: Vec<Option<Node<K>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    options: QuadTreeOptions,
    /// Item -> node currently holding it.
    location: HashMap<K, NodeId>,
    /// Items not contained in any node.
    pending: HashSet<K>,
}

impl<K> core::fmt::Debug for QuadTree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds())
            .field("options", &self.options)
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("items", &self.location.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    generation: u32,
    pub(crate) bounds: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) items: HashSet<K>,
}

impl<K> Node<K> {
    fn new(generation: u32, bounds: Rect, parent: Option<NodeId>) -> Self {
        Self {
            generation,
            bounds,
            parent,
            children: None,
            items: HashSet::new(),
        }
    }
}

impl<K> QuadTree<K> {
    /// Create a tree covering `width` × `height` with its origin at `(0, 0)`.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_origin(0.0, 0.0, width, height)
    }

    /// Create a tree covering `width` × `height` starting at `(x, y)`.
    pub fn with_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_options(
            Rect::from_origin_size((x, y), (width, height)),
            QuadTreeOptions::default(),
        )
    }

    /// Create a tree covering `bounds` with explicit options.
    ///
    /// A `min_area` that is not a positive number is replaced by
    /// [`QuadTreeOptions::DEFAULT_MIN_AREA`].
    pub fn with_options(bounds: Rect, mut options: QuadTreeOptions) -> Self {
        if options.min_area.is_nan() || options.min_area <= 0.0 {
            debug!(min_area = options.min_area, "non-positive min_area, using default");
            options.min_area = QuadTreeOptions::DEFAULT_MIN_AREA;
        }
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            options,
            location: HashMap::new(),
            pending: HashSet::new(),
        };
        tree.root = tree.alloc_node(bounds.abs(), None);
        tree
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Region covered by the tree.
    pub fn bounds(&self) -> Rect {
        self.node(self.root).bounds
    }

    /// Options the tree was created with.
    pub fn options(&self) -> QuadTreeOptions {
        self.options
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the current
    /// generation stored in that slot. Pruned nodes are never live again.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Bounds of a live node.
    pub fn node_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.bounds)
    }

    /// Children of a live node, in [`Quadrant`](crate::Quadrant) order.
    ///
    /// Returns `None` for leaves and stale ids.
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 4]> {
        self.node_opt(id).and_then(|n| n.children)
    }

    /// Parent of a live node; `None` for the root and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Number of items held directly by `id`, not counting descendants.
    pub fn local_count(&self, id: NodeId) -> usize {
        self.node_opt(id).map_or(0, |n| n.items.len())
    }

    /// Number of items held by `id` and all of its descendants.
    pub fn count_in(&self, id: NodeId) -> usize {
        let Some(node) = self.node_opt(id) else {
            return 0;
        };
        let below = node
            .children
            .map_or(0, |cs| cs.iter().map(|&c| self.count_in(c)).sum());
        node.items.len() + below
    }

    /// Number of items placed in the tree. Pending items are not counted.
    pub fn count(&self) -> usize {
        self.count_in(self.root)
    }

    /// Number of pending items.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Iterate pending items, in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &K> + '_ {
        self.pending.iter()
    }

    /// True if no item is tracked, placed or pending.
    pub fn is_empty(&self) -> bool {
        self.location.is_empty() && self.pending.is_empty()
    }

    /// Split a leaf into four equal quadrants.
    ///
    /// Does nothing if `id` is stale or already has children, or if its area is zero or
    /// below [`QuadTreeOptions::min_area`].
    pub fn subdivide(&mut self, id: NodeId) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        let area = node.bounds.area();
        if node.children.is_some() || area <= 0.0 || area < self.options.min_area {
            return;
        }
        let quads = quadrants(&node.bounds);
        let children = quads.map(|q| self.alloc_node(q, Some(id)));
        self.node_mut(id).children = Some(children);
        trace!(node = ?id, "subdivided");
    }

    // --- internals ---

    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        self.node_opt(id).expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        let n = self.nodes[id.idx()].as_mut().expect("dangling NodeId");
        debug_assert_eq!(n.generation, id.1, "dangling NodeId");
        n
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node<K>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn alloc_node(&mut self, bounds: Rect, parent: Option<NodeId>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, bounds, parent));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, bounds, parent)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    /// Free `id` and everything below it.
    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes[id.idx()].take() else {
            return;
        };
        debug_assert!(node.items.is_empty(), "freeing a node that still holds items");
        if let Some(children) = node.children {
            for c in children {
                self.free_subtree(c);
            }
        }
        self.free_list.push(id.idx());
    }

    /// Drop the children of `id` if neither it nor any descendant holds items.
    ///
    /// Returns true if the subtree was empty.
    pub(crate) fn prune_if_empty(&mut self, id: NodeId) -> bool {
        if self.count_in(id) != 0 {
            return false;
        }
        if let Some(children) = self.node_mut(id).children.take() {
            for c in children {
                self.free_subtree(c);
            }
            trace!(node = ?id, "pruned empty children");
        }
        true
    }

    /// Prune `id`, then each ancestor in turn while they stay empty.
    fn prune_upward(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            if !self.prune_if_empty(id) {
                break;
            }
            current = self.node(id).parent;
        }
    }
}

impl<K> QuadTree<K>
where
    K: Bounded + Clone + Eq + Hash,
{
    /// Insert `item` into the smallest node that contains its current bounds.
    ///
    /// Returns the node that now holds the item, or `None` if the bounds are not
    /// contained in the tree's region. Such an item becomes pending and is retried on
    /// every [`QuadTree::update`]. Inserting an item that is already tracked re-homes it.
    pub fn insert(&mut self, item: K) -> Option<NodeId> {
        self.detach(&item);
        self.place(item)
    }

    /// Remove `item` from the tree.
    ///
    /// Empty subtrees left behind are pruned, walking upward from the node that held the
    /// item. Removing an untracked item is a no-op.
    pub fn remove(&mut self, item: &K) {
        if let Some(node) = self.location.remove(item) {
            self.node_mut(node).items.remove(item);
            self.prune_upward(node);
        } else if self.pending.remove(item) {
            debug!("removed pending item");
        }
    }

    /// Drop every item and return the root to a leaf.
    pub fn clear(&mut self) {
        let root = self.root;
        self.location.clear();
        self.pending.clear();
        let node = self.node_mut(root);
        node.items.clear();
        if let Some(children) = node.children.take() {
            for c in children {
                self.clear_subtree(c);
            }
        }
    }

    /// Node currently holding `item`; `None` if it is pending or untracked.
    pub fn node_of(&self, item: &K) -> Option<NodeId> {
        self.location.get(item).copied()
    }

    /// True if `item` is placed in some node or pending.
    pub fn contains_item(&self, item: &K) -> bool {
        self.location.contains_key(item) || self.pending.contains(item)
    }

    /// True if `item` is pending.
    pub fn is_pending(&self, item: &K) -> bool {
        self.pending.contains(item)
    }

    /// Find the smallest node that contains `item`'s bounds, searching down from the root.
    ///
    /// The item is not assigned. Nodes on the way down are subdivided when eligible, so
    /// this may create nodes even if the caller never inserts the item.
    pub fn find_home(&mut self, item: &K) -> Option<NodeId> {
        self.find_home_from(self.root, item.bounds(), false)
    }

    /// All items placed in the tree, in no particular order. Pending items are not included.
    pub fn all_items(&self) -> Vec<K> {
        self.collect_all(self.root)
    }

    /// All items held by `id` and its descendants, in no particular order.
    pub fn collect_all(&self, id: NodeId) -> Vec<K> {
        let mut out = Vec::new();
        if self.is_alive(id) {
            self.collect_into(id, &mut out);
        }
        out
    }

    pub(crate) fn collect_into(&self, id: NodeId, out: &mut Vec<K>) {
        let node = self.node(id);
        out.extend(node.items.iter().cloned());
        if let Some(children) = node.children {
            for c in children {
                self.collect_into(c, out);
            }
        }
    }

    /// Smallest node at or below `id` containing `bounds`.
    ///
    /// If `id` does not contain `bounds`, the search continues at the parent when
    /// `search_upward` is set; otherwise there is no home.
    pub(crate) fn find_home_from(
        &mut self,
        id: NodeId,
        bounds: Rect,
        search_upward: bool,
    ) -> Option<NodeId> {
        let node = self.node(id);
        if !contains(&node.bounds, &bounds) {
            let parent = node.parent;
            return match parent {
                Some(parent) if search_upward => self.find_home_from(parent, bounds, true),
                _ => None,
            };
        }
        self.subdivide(id);
        if let Some(children) = self.node(id).children {
            for c in children {
                if let Some(home) = self.find_home_from(c, bounds, false) {
                    return Some(home);
                }
            }
        }
        Some(id)
    }

    /// Place an untracked item, or mark it pending.
    pub(crate) fn place(&mut self, item: K) -> Option<NodeId> {
        let bounds = item.bounds();
        debug_assert!(bounds.is_finite(), "item bounds must be finite");
        match self.find_home_from(self.root, bounds, false) {
            Some(home) => {
                self.assign(item, home);
                Some(home)
            }
            None => {
                debug!(?bounds, "item outside tree bounds, pending");
                self.pending.insert(item);
                None
            }
        }
    }

    /// Move an item held by `from` into `to`, or into pending when `to` is `None`.
    pub(crate) fn relocate(&mut self, item: K, from: NodeId, to: Option<NodeId>) {
        self.node_mut(from).items.remove(&item);
        match to {
            Some(to) => self.assign(item, to),
            None => {
                debug!(node = ?from, "item left tree bounds, pending");
                self.location.remove(&item);
                self.pending.insert(item);
            }
        }
    }

    /// Take every pending item out of the pending set.
    pub(crate) fn drain_pending(&mut self) -> Vec<K> {
        self.pending.drain().collect()
    }

    fn assign(&mut self, item: K, home: NodeId) {
        self.pending.remove(&item);
        self.node_mut(home).items.insert(item.clone());
        self.location.insert(item, home);
    }

    /// Forget where `item` is without pruning.
    fn detach(&mut self, item: &K) {
        if let Some(node) = self.location.remove(item) {
            self.node_mut(node).items.remove(item);
        }
        self.pending.remove(item);
    }

    fn clear_subtree(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        node.items.clear();
        if let Some(children) = node.children {
            for c in children {
                self.clear_subtree(c);
            }
        }
        self.free_subtree(id);
    }
}
