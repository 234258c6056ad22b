// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic traversal, e.g. for drawing the tree.

use alloc::vec;
use kurbo::Rect;

use crate::tree::QuadTree;
use crate::types::NodeId;

/// Callbacks for [`QuadTree::visit`].
///
/// Nodes are visited depth-first in quadrant order, each node before its children
/// and its own items. `depth` is `0` for the root.
pub trait QuadTreeVisitor<K> {
    /// A node with four children.
    fn branch(&mut self, _depth: usize, _id: NodeId, _bounds: Rect) {}

    /// A node without children.
    fn leaf(&mut self, _depth: usize, _id: NodeId, _bounds: Rect) {}

    /// An item held directly by the node visited just before.
    fn item(&mut self, _depth: usize, _item: &K) {}
}

impl<K> QuadTree<K> {
    /// Walk every live node and placed item. Pending items are not visited.
    pub fn visit<V: QuadTreeVisitor<K>>(&self, visitor: &mut V) {
        let mut stack = vec![(self.root(), 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            match node.children {
                Some(children) => {
                    visitor.branch(depth, id, node.bounds);
                    // Reversed so the top-left quadrant pops first.
                    stack.extend(children.iter().rev().map(|&c| (c, depth + 1)));
                }
                None => visitor.leaf(depth, id, node.bounds),
            }
            for item in &node.items {
                visitor.item(depth, item);
            }
        }
    }
}
