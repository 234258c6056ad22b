// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a dynamic region quadtree over Kurbo rectangles.
//!
//! Understory Quadtree answers "which items overlap this rectangle" for items that move
//! between queries, such as sprites in a collision or visibility pass.
//!
//! - Covers a fixed rectangle and subdivides it lazily into equal quadrants, down to a
//!   minimum node area.
//! - Stores each item in the smallest node that fully contains its bounding box.
//! - Items report their own bounds through the [`Bounded`] trait; the tree re-reads them
//!   instead of caching a copy.
//! - [`QuadTree::update`] re-homes items that moved since the last pass, so callers do not
//!   rebuild the tree every frame.
//!
//! ## Pending items
//!
//! An item whose box is not contained in the tree's region is not an error. It becomes
//! *pending*: it is never returned by queries, and every [`QuadTree::update`] tries to place
//! it again. Items that wander out of the region during an update become pending the same way.
//!
//! ## Item identity
//!
//! Items are compared with `Eq` and `Hash`, and the tree keeps a clone of each one. Use small
//! handles (ids, `Rc`s, or [`Shared`]) rather than large values. [`Shared`] compares by
//! reference, which lets the owner move an item through its own clone of the handle.
//!
//! Items must be [removed](QuadTree::remove) before their owner discards them.
//!
//! ## API overview
//!
//! - [`QuadTree`]: the tree and its item registry.
//! - [`QuadTreeOptions`]: construction options (minimum subdivision area).
//! - [`NodeId`]: generational handle of a node; stale after its subtree is pruned.
//! - [`Quadrant`]: child order of a subdivided node.
//! - [`QuadTreeVisitor`]: callbacks for a depth-first walk, e.g. for debug drawing.
//! - [`geometry`]: the intersection and containment predicates the tree uses.
//!
//! Key operations:
//! - [`QuadTree::insert`] → [`Option<NodeId>`](NodeId)
//! - [`QuadTree::remove`]
//! - [`QuadTree::query`] and [`QuadTree::query_point`]
//! - [`QuadTree::update`]
//! - [`QuadTree::count`] and [`QuadTree::all_items`]
//!
//! ## Not thread-safe
//!
//! All operations run to completion on the caller's thread and mutate the tree in place.
//! Share a tree across threads only behind your own synchronization.
//!
//! # Example
//!
//! ```
//! use kurbo::Rect;
//! use understory_quadtree::{QuadTree, Shared};
//!
//! let mut tree = QuadTree::new(100.0, 100.0);
//! let a = Shared::new(Rect::new(10.0, 10.0, 12.0, 12.0));
//! let b = Shared::new(Rect::new(60.0, 60.0, 62.0, 62.0));
//! tree.insert(a.clone());
//! tree.insert(b.clone());
//!
//! assert_eq!(tree.query(Rect::new(0.0, 0.0, 50.0, 50.0)), vec![a.clone()]);
//! assert_eq!(tree.query(Rect::new(0.0, 0.0, 100.0, 100.0)).len(), 2);
//!
//! // Move `a` and let the tree catch up.
//! *a.borrow_mut() = Rect::new(70.0, 10.0, 72.0, 12.0);
//! tree.update();
//! assert!(tree.query(Rect::new(0.0, 0.0, 50.0, 50.0)).is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geometry;
mod query;
mod rebalance;
mod shared;
mod tree;
mod types;
mod visit;

pub use shared::Shared;
pub use tree::QuadTree;
pub use types::{Bounded, NodeId, Quadrant, QuadTreeOptions};
pub use visit::QuadTreeVisitor;
