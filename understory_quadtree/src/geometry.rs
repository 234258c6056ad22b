// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box predicates used by the tree.
//!
//! All predicates take [`Rect`]s in the usual Kurbo convention (`x0 <= x1`, `y0 <= y1`).
//! They are pure and total over finite inputs, including zero-sized rectangles.

use kurbo::Rect;

/// Whether the open interiors of `a` and `b` overlap on both axes.
///
/// Rectangles that only share an edge or a corner do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Whether `outer` fully encloses `inner`, boundaries included.
///
/// Every rectangle contains itself, zero-sized ones too.
#[inline]
pub fn contains(outer: &Rect, inner: &Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Split `r` into four equal quadrants.
///
/// Order is top-left, top-right, bottom-left, bottom-right (y grows downward).
pub(crate) fn quadrants(r: &Rect) -> [Rect; 4] {
    let mx = r.x0 + r.width() * 0.5;
    let my = r.y0 + r.height() * 0.5;
    [
        Rect::new(r.x0, r.y0, mx, my),
        Rect::new(mx, r.y0, r.x1, my),
        Rect::new(r.x0, my, mx, r.y1),
        Rect::new(mx, my, r.x1, r.y1),
    ]
}
