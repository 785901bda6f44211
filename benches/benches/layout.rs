// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use vitrine_layout::{
    GridParams, GroupedItem, GroupedParams, RowParams, grid_layout, grouped_layout, row_layout,
};

const AD_SIZES: [(f64, f64); 6] = [
    (300.0, 250.0),
    (728.0, 90.0),
    (160.0, 600.0),
    (320.0, 50.0),
    (970.0, 250.0),
    (300.0, 600.0),
];

const GROUPS: [&str; 5] = ["Auto", "Finance", "Food", "Retail", "Travel"];

fn sizes(n: usize) -> Vec<Size> {
    (0..n)
        .map(|i| {
            let (w, h) = AD_SIZES[i % AD_SIZES.len()];
            Size::new(w, h)
        })
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/grid");
    let container = Size::new(1280.0, 800.0);
    let params = GridParams::new(30.0, 200.0);

    // Every column count is tried, so this is quadratic-ish in the item count.
    for n in [64_usize, 512, 2_048] {
        let items = sizes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(grid_layout(black_box(items), container, &params)));
        });
    }
    group.finish();
}

fn bench_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/rows");
    let params = RowParams {
        row_height: 100.0,
        gap: 5.0,
        widen_factor: 2.0,
    };
    for n in [64_usize, 512, 4_096] {
        let items = sizes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(row_layout(black_box(items), &params)));
        });
    }
    group.finish();
}

fn bench_grouped(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/grouped");
    let params = GroupedParams::default();
    for n in [64_usize, 512, 4_096] {
        let items: Vec<GroupedItem<'_>> = sizes(n)
            .into_iter()
            .enumerate()
            .map(|(i, size)| GroupedItem {
                group: GROUPS[i % GROUPS.len()],
                size,
            })
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(grouped_layout(black_box(items), 1280.0, &params)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_rows, bench_grouped);
criterion_main!(benches);
