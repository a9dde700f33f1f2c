// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use thicket_area::compute_area;
use thicket_model::{Category, Memo, NodeId, Page};

/// Builds a page with `width` top-level categories, each a chain of `depth`
/// nested categories, each level holding `memos_per_level` memos.
fn build_page(width: u64, depth: u64, memos_per_level: u64) -> Page {
    let mut page = Page::new();
    let mut next_id = 1u64;
    for w in 0..width {
        let mut parent: Option<NodeId> = None;
        for d in 0..depth {
            let cat_id = NodeId::new(next_id);
            next_id += 1;
            let mut category =
                Category::new(cat_id, Point::new(w as f64 * 600.0, d as f64 * 40.0));
            category.parent_id = parent;
            page.categories.push(category);

            for m in 0..memos_per_level {
                let memo_id = NodeId::new(next_id);
                next_id += 1;
                page.memos.push(
                    Memo::new(
                        memo_id,
                        Point::new(w as f64 * 600.0 + m as f64 * 30.0, d as f64 * 120.0),
                    )
                    .with_parent(cat_id),
                );
            }
            parent = Some(cat_id);
        }
    }
    page
}

fn bench_compute_area(c: &mut Criterion) {
    let mut group = c.benchmark_group("area/compute");

    for depth in [2u64, 8, 32] {
        let page = build_page(1, depth, 4);
        let root = NodeId::new(1);
        group.throughput(Throughput::Elements(depth));
        group.bench_with_input(BenchmarkId::new("nested_chain", depth), &page, |b, page| {
            b.iter(|| black_box(compute_area(page, root)));
        });
    }

    for width in [16u64, 128] {
        let page = build_page(width, 2, 4);
        group.throughput(Throughput::Elements(width));
        group.bench_with_input(BenchmarkId::new("board_sweep", width), &page, |b, page| {
            b.iter(|| {
                for category in &page.categories {
                    black_box(compute_area(page, category.id));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_area);
criterion_main!(benches);
