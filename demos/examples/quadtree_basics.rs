// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Insert a few boxes, query a window, remove one, and query again.
//!
//! Run:
//! - `cargo run -p understory_demos --example quadtree_basics`

use kurbo::Rect;
use understory_quadtree::{QuadTree, Shared};

fn main() {
    let mut tree = QuadTree::new(100.0, 100.0);
    let a = Shared::new(Rect::from_origin_size((10.0, 10.0), (2.0, 2.0)));
    let b = Shared::new(Rect::from_origin_size((60.0, 60.0), (2.0, 2.0)));
    let outside = Shared::new(Rect::from_origin_size((140.0, 10.0), (2.0, 2.0)));

    let home_a = tree.insert(a.clone());
    let home_b = tree.insert(b.clone());
    let home_out = tree.insert(outside.clone());
    println!("a -> {:?}, b -> {:?}, outside -> {:?}", home_a, home_b, home_out);
    println!("{:?}", tree);

    let top_left = Rect::new(0.0, 0.0, 50.0, 50.0);
    let hits = tree.query(top_left);
    println!("top-left hits: {:?}", hits);
    assert_eq!(hits, vec![a.clone()]);

    let all = tree.query(Rect::new(0.0, 0.0, 100.0, 100.0));
    println!("hits over the whole region: {}", all.len());
    assert_eq!(all.len(), 2, "the pending item is never returned");

    tree.remove(&a);
    assert!(tree.query(top_left).is_empty());
    println!(
        "after removing a: count={}, pending={}, nodes={}",
        tree.count(),
        tree.pending_count(),
        tree.node_count()
    );
}
