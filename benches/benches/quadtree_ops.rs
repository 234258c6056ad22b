// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_quadtree::geometry::intersects;
use understory_quadtree::{QuadTree, Shared};

const WORLD: f64 = 2048.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_items(count: usize, size: f64, seed: u64) -> Vec<Shared<Rect>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (WORLD - size);
            let y0 = rng.next_f64() * (WORLD - size);
            Shared::new(Rect::from_origin_size((x0, y0), (size, size)))
        })
        .collect()
}

fn gen_clustered_items(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Shared<Rect>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = spread + rng.next_f64() * (WORLD - 2.0 * spread);
        let cy = spread + rng.next_f64() * (WORLD - 2.0 * spread);
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Shared::new(Rect::from_origin_size(
                (cx + dx, cy + dy),
                (12.0, 12.0),
            )));
        }
    }
    out
}

fn build(items: &[Shared<Rect>]) -> QuadTree<Shared<Rect>> {
    let mut tree = QuadTree::new(WORLD, WORLD);
    for it in items {
        let _ = tree.insert(it.clone());
    }
    tree
}

/// Nudge every item, bouncing off the world edges.
fn jitter(items: &[Shared<Rect>], rng: &mut Rng, step: f64) {
    for it in items {
        let r = *it.borrow();
        let dx = (rng.next_f64() - 0.5) * step;
        let dy = (rng.next_f64() - 0.5) * step;
        let x0 = (r.x0 + dx).clamp(0.0, WORLD - r.width());
        let y0 = (r.y0 + dy).clamp(0.0, WORLD - r.height());
        it.replace(Rect::from_origin_size((x0, y0), r.size()));
    }
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for &n in &[1_000usize, 10_000] {
        let items = gen_random_items(n, 8.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("random_n{}", n), |b| {
            b.iter(|| black_box(build(&items)).count());
        });
    }
    let items = gen_clustered_items(32, 256, 120.0);
    group.throughput(Throughput::Elements(items.len() as u64));
    group.bench_function("clustered", |b| {
        b.iter(|| black_box(build(&items)).count());
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    let windows = [
        ("small", Rect::new(100.0, 100.0, 164.0, 164.0)),
        ("viewport", Rect::new(400.0, 300.0, 1680.0, 1020.0)),
        ("everything", Rect::new(0.0, 0.0, WORLD, WORLD)),
    ];
    for &n in &[1_000usize, 10_000] {
        let items = gen_random_items(n, 8.0, 0xBADC_F00D_1234_5678);
        let tree = build(&items);
        let mut out = Vec::with_capacity(n);
        for (name, window) in windows {
            group.bench_function(format!("{}_n{}", name, n), |b| {
                b.iter(|| {
                    out.clear();
                    tree.query_into(black_box(window), &mut out);
                    black_box(out.len())
                });
            });
            group.bench_function(format!("{}_linear_n{}", name, n), |b| {
                b.iter(|| {
                    let hits = items
                        .iter()
                        .filter(|it| intersects(&it.borrow(), &window))
                        .count();
                    black_box(hits)
                });
            });
        }
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_update");
    for &n in &[1_000usize, 10_000] {
        group.throughput(Throughput::Elements(n as u64));

        let items = gen_random_items(n, 8.0, 0xFACE_FEED_CAFE_BABE);
        let mut tree = build(&items);
        group.bench_function(format!("static_n{}", n), |b| {
            b.iter(|| tree.update());
        });

        group.bench_function(format!("moving_n{}", n), |b| {
            b.iter_batched(
                || {
                    let items = gen_random_items(n, 8.0, 0xFACE_FEED_CAFE_BABE);
                    let tree = build(&items);
                    let mut rng = Rng::new(0x1234_5678_9ABC_DEF0);
                    jitter(&items, &mut rng, 16.0);
                    (items, tree)
                },
                |(items, mut tree)| {
                    tree.update();
                    black_box(tree.count());
                    items
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_update);
criterion_main!(benches);
