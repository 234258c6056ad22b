// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental rebalancing after items move.

use alloc::vec::Vec;
use core::hash::Hash;

use tracing::debug;

use crate::tree::QuadTree;
use crate::types::{Bounded, NodeId};

#[derive(Clone, Copy, Debug, Default)]
struct PassStats {
    scanned: usize,
    moved: usize,
    left: usize,
    placed: usize,
}

impl<K> QuadTree<K>
where
    K: Bounded + Clone + Eq + Hash,
{
    /// Re-home every item whose bounds changed since the last pass.
    ///
    /// Pending items are retried first. Then every placed item is checked against its node,
    /// searching upward when it no longer fits, and moved (or made pending) if its home changed.
    /// Subtrees left empty are pruned bottom-up.
    ///
    /// Every placed item is re-read once per call, so cost scales with item count, not with
    /// the number of items that actually moved.
    pub fn update(&mut self) {
        let mut stats = PassStats::default();
        for item in self.drain_pending() {
            if let Some(home) = self.place(item) {
                debug!(node = ?home, "pending item placed");
                stats.placed += 1;
            }
        }
        self.update_node(self.root(), &mut stats);
        debug!(
            scanned = stats.scanned,
            moved = stats.moved,
            left_bounds = stats.left,
            placed = stats.placed,
            pending = self.pending_count(),
            "update pass"
        );
    }

    fn update_node(&mut self, id: NodeId, stats: &mut PassStats) {
        let items: Vec<K> = self.node(id).items.iter().cloned().collect();
        stats.scanned += items.len();
        for item in items {
            let home = self.find_home_from(id, item.bounds(), true);
            if home == Some(id) {
                continue;
            }
            match home {
                Some(_) => stats.moved += 1,
                None => stats.left += 1,
            }
            self.relocate(item, id, home);
        }
        // Read after the scan: homing an item here may have subdivided this node.
        if let Some(children) = self.node(id).children {
            for c in children {
                self.update_node(c, stats);
            }
        }
        self.prune_if_empty(id);
    }
}
