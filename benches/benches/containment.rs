// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use thicket_area::AreaCache;
use thicket_containment::{resolve_drop_target, restrict_movement};
use thicket_model::{Category, Memo, NodeId, Page};

/// A board of `count` expanded single-memo categories in a row, plus one
/// free memo to drag around.
fn board(count: u64) -> (Page, NodeId) {
    let mut page = Page::new();
    let mut next_id = 1u64;
    for i in 0..count {
        let cat_id = NodeId::new(next_id);
        next_id += 1;
        page.categories
            .push(Category::new(cat_id, Point::new(i as f64 * 400.0, 0.0)));
        let memo_id = NodeId::new(next_id);
        next_id += 1;
        page.memos.push(
            Memo::new(memo_id, Point::new(i as f64 * 400.0, 0.0)).with_parent(cat_id),
        );
    }
    let free = NodeId::new(next_id);
    page.memos
        .push(Memo::new(free, Point::new(-400.0, 300.0)));
    (page, free)
}

fn bench_restrict(c: &mut Criterion) {
    let mut group = c.benchmark_group("containment/restrict");

    for count in [8u64, 64, 256] {
        let (page, free) = board(count);
        let cache = AreaCache::new();
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("sweep_move", count), &page, |b, page| {
            b.iter(|| {
                // A move that grazes the first category's area boundary.
                black_box(restrict_movement(
                    page,
                    &cache,
                    free,
                    Point::new(-400.0, 300.0),
                    Point::new(-100.0, 60.0),
                ))
            });
        });
    }

    group.finish();
}

fn bench_drop_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("containment/drop_target");

    for count in [8u64, 64, 256] {
        let (page, free) = board(count);
        let mut cache = AreaCache::new();
        cache.begin_reparent_snapshot(&page);
        // Hover over the middle category's area.
        let pointer = Point::new((count / 2) as f64 * 400.0 + 50.0, 30.0);
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("hover", count), &page, |b, page| {
            b.iter(|| black_box(resolve_drop_target(page, &cache, pointer, free)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_restrict, bench_drop_target);
criterion_main!(benches);
