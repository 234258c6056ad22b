// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the quadtree: node identifiers, the item capability, and options.

use alloc::boxed::Box;
use alloc::rc::Rc;
use kurbo::Rect;

/// Identifier for a node in the tree.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - Nodes are created when their parent subdivides; the root is created with the tree.
/// - When a subtree is pruned, its slots are freed and every `NodeId` that pointed into it
///   becomes stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`QuadTree::is_alive`](crate::QuadTree::is_alive) to check whether a `NodeId` still refers
/// to a live node. Stale ids never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Position of a child inside its parent.
///
/// Children are always created as a group of four, in the order of the variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Quadrant {
    /// Minimum x, minimum y.
    TopLeft = 0,
    /// Maximum x, minimum y.
    TopRight = 1,
    /// Minimum x, maximum y.
    BottomLeft = 2,
    /// Maximum x, maximum y.
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Index of this quadrant within a children array.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Capability required of indexed items: report the current bounding box.
///
/// The tree never caches the result; it asks again whenever it needs the box,
/// so items may move between calls to [`QuadTree::update`](crate::QuadTree::update).
///
/// Item identity is taken from `Eq`/`Hash`. Two values that compare equal are the
/// same item as far as the tree is concerned; see [`Shared`](crate::Shared) for a
/// handle that compares by reference.
pub trait Bounded {
    /// Current axis-aligned bounding box.
    fn bounds(&self) -> Rect;
}

/// `Rect` is not `Eq` or `Hash`, so it cannot be a tree item by itself. Wrap it in
/// [`Shared`](crate::Shared), or in a handle type of your own.
impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Bounded + ?Sized> Bounded for Box<T> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Bounded + ?Sized> Bounded for Rc<T> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

/// Construction options for a [`QuadTree`](crate::QuadTree).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadTreeOptions {
    /// Nodes whose area is below this never subdivide.
    ///
    /// Must be positive; [`QuadTree::with_options`](crate::QuadTree::with_options) replaces
    /// anything else with [`Self::DEFAULT_MIN_AREA`].
    pub min_area: f64,
}

impl QuadTreeOptions {
    /// Subdivision threshold used by [`QuadTreeOptions::default`].
    pub const DEFAULT_MIN_AREA: f64 = 16.0;
}

impl Default for QuadTreeOptions {
    fn default() -> Self {
        Self {
            min_area: Self::DEFAULT_MIN_AREA,
        }
    }
}
