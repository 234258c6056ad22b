// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_quadtree::{QuadTree, Shared};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            // Inset so neighbours do not share edges with quadrant lines.
            out.push(Rect::new(x0 + 1.0, y0 + 1.0, x0 + cell - 1.0, y0 + cell - 1.0));
        }
    }
    out
}

fn to_rstar_rects(v: &[Rect]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.x0, r.y0], [r.x1, r.y1]))
        .collect()
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[64usize, 128] {
        let cell = 10.0;
        let world = n as f64 * cell;
        let rects = gen_grid_rects(n, cell);
        let query = Rect::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_query_n{}", n), |b| {
            b.iter_batched(
                || rects.iter().copied().map(Shared::new).collect::<Vec<_>>(),
                |items| {
                    let mut tree = QuadTree::new(world, world);
                    for it in &items {
                        let _ = tree.insert(it.clone());
                    }
                    black_box(tree.query(query).len());
                    items
                },
                BatchSize::SmallInput,
            )
        });

        let rs_rects = to_rstar_rects(&rects);
        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || rs_rects.clone(),
                |v| {
                    let tree = RTree::bulk_load(v);
                    let env = AABB::from_corners([query.x0, query.y0], [query.x1, query.y1]);
                    let hits = tree.locate_in_envelope_intersecting(&env).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        let items: Vec<_> = rects.iter().copied().map(Shared::new).collect();
        let mut tree = QuadTree::new(world, world);
        for it in &items {
            let _ = tree.insert(it.clone());
        }
        group.bench_function(format!("quadtree_query_only_n{}", n), |b| {
            b.iter(|| black_box(tree.query(black_box(query)).len()))
        });

        let rtree = RTree::bulk_load(rs_rects.clone());
        let env = AABB::from_corners([query.x0, query.y0], [query.x1, query.y1]);
        group.bench_function(format!("rstar_query_only_n{}", n), |b| {
            b.iter(|| black_box(rtree.locate_in_envelope_intersecting(&env).count()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
