// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print the shape of a quadtree with a visitor.
//!
//! Run:
//! - `cargo run -p understory_demos --example quadtree_debug_draw`

use kurbo::Rect;
use understory_quadtree::{NodeId, QuadTree, QuadTreeVisitor, Shared};

#[derive(Default)]
struct Outline {
    lines: Vec<String>,
    leaves: usize,
}

impl QuadTreeVisitor<Shared<Rect>> for Outline {
    fn branch(&mut self, depth: usize, _id: NodeId, bounds: Rect) {
        self.lines.push(format!("{}+ {:?}", "  ".repeat(depth), bounds));
    }

    fn leaf(&mut self, _depth: usize, _id: NodeId, _bounds: Rect) {
        self.leaves += 1;
    }

    fn item(&mut self, depth: usize, item: &Shared<Rect>) {
        self.lines
            .push(format!("{}* {:?}", "  ".repeat(depth + 1), *item.borrow()));
    }
}

fn main() {
    let mut tree = QuadTree::new(256.0, 256.0);
    for r in [
        Rect::new(4.0, 4.0, 8.0, 8.0),
        Rect::new(120.0, 120.0, 136.0, 136.0),
        Rect::new(200.0, 20.0, 210.0, 30.0),
        Rect::new(30.0, 200.0, 31.0, 201.0),
    ] {
        let _ = tree.insert(Shared::new(r));
    }

    let mut outline = Outline::default();
    tree.visit(&mut outline);
    for line in &outline.lines {
        println!("{line}");
    }
    println!(
        "{} nodes ({} leaves), {} items",
        tree.node_count(),
        outline.leaves,
        tree.count()
    );
}
