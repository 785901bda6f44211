// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vitrine_facets::{FilterState, Item, SortSpec};

const VERTICALS: [&str; 5] = ["Auto", "Finance", "Food", "Retail", "Travel"];
const NETWORKS: [&str; 3] = ["Display", "Social", "Video"];

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

fn items(n: usize, seed: u64) -> Vec<Item> {
    let mut rng = Lcg(seed);
    (0..n)
        .map(|i| {
            let vertical = VERTICALS[rng.next_u32() as usize % VERTICALS.len()];
            let network = NETWORKS[rng.next_u32() as usize % NETWORKS.len()];
            let ctr = f64::from(rng.next_u32() % 1_000) / 100.0;
            Item::new(format!("ad-{i}"), 300.0, 250.0)
                .with_attr("vertical", vertical)
                .with_attr("network", network)
                .with_attr("ctr", ctr)
        })
        .collect()
}

fn bench_visible_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("facets/visible_set");

    let mut filtered = FilterState::new();
    filtered.set_allowed("vertical", ["Auto", "Travel"]);
    filtered.set_allowed("network", ["Display", "Video"]);

    let mut sorted = filtered.clone();
    sorted.set_sort(Some(SortSpec::descending("ctr")));

    for n in [256_usize, 4_096, 32_768] {
        let items = items(n, 0x5EED_0000_0000_0001);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("filter", n), &items, |b, items| {
            b.iter(|| black_box(filtered.visible_set(black_box(items)).len()));
        });
        group.bench_with_input(BenchmarkId::new("filter_sort", n), &items, |b, items| {
            b.iter(|| black_box(sorted.visible_set(black_box(items)).len()));
        });
        group.bench_with_input(BenchmarkId::new("filter_group", n), &items, |b, items| {
            let mut grouping = filtered.clone();
            grouping.set_group(Some("vertical".into()));
            b.iter(|| {
                let visible = grouping.visible_set(black_box(items));
                black_box(grouping.group_visible(&visible).map(|g| g.len()))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_visible_set);
criterion_main!(benches);
