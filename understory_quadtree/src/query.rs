// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range and point queries.
//!
//! Quadrants of a node never overlap, so a query rectangle can lie inside at most one of
//! them. When it does, the remaining siblings are skipped. A quadrant that lies inside the
//! query rectangle is collected wholesale without testing each item.

use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::{Point, Rect};

use crate::geometry::{contains, intersects};
use crate::tree::QuadTree;
use crate::types::{Bounded, NodeId};

impl<K> QuadTree<K>
where
    K: Bounded + Clone + Eq + Hash,
{
    /// Items whose bounds intersect `rect`, in no particular order.
    ///
    /// Pending items are never returned. Each item appears at most once.
    ///
    /// Nodes that lie entirely inside `rect` are collected whole, without testing each
    /// item. This only matters for zero-size items, which never
    /// [intersect](crate::geometry::intersects) anything: one is returned when `rect`
    /// covers its whole node, and not when `rect` only overlaps part of that node.
    pub fn query(&self, rect: Rect) -> Vec<K> {
        let mut out = Vec::new();
        self.query_into(rect, &mut out);
        out
    }

    /// Like [`QuadTree::query`], appending to `out` so callers can reuse the allocation.
    pub fn query_into(&self, rect: Rect, out: &mut Vec<K>) {
        self.query_node_into(self.root(), &rect, out);
    }

    /// Items in the subtree under `id` whose bounds intersect `rect`.
    ///
    /// Returns an empty list for stale ids.
    pub fn query_node(&self, id: NodeId, rect: Rect) -> Vec<K> {
        let mut out = Vec::new();
        if self.is_alive(id) {
            self.query_node_into(id, &rect, &mut out);
        }
        out
    }

    /// Items whose bounds contain `pt`, boundaries included.
    pub fn query_point(&self, pt: Point) -> Vec<K> {
        let mut out = Vec::new();
        let probe = Rect::from_points(pt, pt);
        self.query_point_into(self.root(), &probe, &mut out);
        out
    }

    fn query_node_into(&self, id: NodeId, rect: &Rect, out: &mut Vec<K>) {
        let node = self.node(id);
        out.extend(
            node.items
                .iter()
                .filter(|item| intersects(&item.bounds(), rect))
                .cloned(),
        );
        let Some(children) = node.children else {
            return;
        };
        for c in children {
            let cb = self.node(c).bounds;
            if contains(&cb, rect) {
                self.query_node_into(c, rect, out);
                break;
            } else if contains(rect, &cb) {
                self.collect_into(c, out);
            } else if intersects(rect, &cb) {
                self.query_node_into(c, rect, out);
            }
        }
    }

    fn query_point_into(&self, id: NodeId, probe: &Rect, out: &mut Vec<K>) {
        let node = self.node(id);
        out.extend(
            node.items
                .iter()
                .filter(|item| contains(&item.bounds(), probe))
                .cloned(),
        );
        if let Some(children) = node.children {
            // A point on a quadrant edge touches more than one child.
            for c in children {
                if contains(&self.node(c).bounds, probe) {
                    self.query_point_into(c, probe, out);
                }
            }
        }
    }
}
