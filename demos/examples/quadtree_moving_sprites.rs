// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving sprites with a per-tick update pass.
//!
//! Sprites drift across the world; some leave it and come back. Each tick moves them,
//! calls `update`, and culls against a fixed viewport.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example quadtree_moving_sprites`

use kurbo::{Rect, Vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Bounded, QuadTree, Shared};

const WORLD: f64 = 512.0;
const TICKS: usize = 20;

#[derive(Debug)]
struct Sprite {
    pos: Vec2,
    vel: Vec2,
    size: f64,
}

impl Bounded for Sprite {
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.pos.to_point(), (self.size, self.size))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,understory_quadtree=debug")),
        )
        .init();

    let mut tree = QuadTree::new(WORLD, WORLD);
    let sprites: Vec<_> = (0..64)
        .map(|i| {
            let f = i as f64;
            Shared::new(Sprite {
                pos: Vec2::new((f * 37.0) % WORLD, (f * 91.0) % WORLD),
                vel: Vec2::new(((i % 7) as f64 - 3.0) * 4.0, ((i % 5) as f64 - 2.0) * 5.0),
                size: 4.0 + (i % 3) as f64 * 4.0,
            })
        })
        .collect();
    for s in &sprites {
        let _ = tree.insert(s.clone());
    }

    let viewport = Rect::new(128.0, 128.0, 384.0, 384.0);
    for tick in 0..TICKS {
        for s in &sprites {
            let mut guard = s.borrow_mut();
            let s = &mut *guard;
            s.pos += s.vel;
            // Sprites that drift far away turn around.
            if s.pos.x < -64.0 || s.pos.x > WORLD + 64.0 {
                s.vel.x = -s.vel.x;
            }
            if s.pos.y < -64.0 || s.pos.y > WORLD + 64.0 {
                s.vel.y = -s.vel.y;
            }
        }
        tree.update();
        let visible = tree.query(viewport);
        info!(
            tick,
            visible = visible.len(),
            placed = tree.count(),
            pending = tree.pending_count(),
            nodes = tree.node_count(),
            "tick"
        );
    }
}
