// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use vitrine_flip::{HeadlessTree, RenderTree, Renderable, TransitionEngine, TransitionOptions};

fn cell(i: u32, cols: u32) -> Rect {
    let (col, row) = (f64::from(i % cols), f64::from(i / cols));
    Rect::from_origin_size(Point::new(col * 60.0, row * 60.0), Size::new(50.0, 50.0))
}

fn tree(n: u32) -> HeadlessTree<u32> {
    let mut tree = HeadlessTree::new();
    for i in 0..n {
        tree.insert(i, cell(i, 20));
    }
    tree
}

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip/animate");
    group.sample_size(50);

    for n in [100_u32, 1_000, 5_000] {
        let keys: Vec<u32> = (0..n).collect();
        // Reflow from 20 to 17 columns so nearly every element moves.
        group.bench_with_input(BenchmarkId::new("start", n), &keys, |b, keys| {
            b.iter_batched(
                || (TransitionEngine::new(), tree(n)),
                |(mut engine, mut tree)| {
                    let batch = engine.animate(
                        &mut tree,
                        keys,
                        |t: &mut dyn RenderTree<u32>| {
                            for &k in keys {
                                if let Some(el) = t.element_mut(&k) {
                                    el.set_layout(cell(k, 17));
                                }
                            }
                        },
                        TransitionOptions::default(),
                    );
                    black_box((engine.running_count(), batch));
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("tick", n), &keys, |b, keys| {
            b.iter_batched(
                || {
                    let mut engine = TransitionEngine::new();
                    let mut tree = tree(n);
                    let _ = engine.animate(
                        &mut tree,
                        keys,
                        |t: &mut dyn RenderTree<u32>| {
                            for &k in keys {
                                if let Some(el) = t.element_mut(&k) {
                                    el.set_layout(cell(k, 17));
                                }
                            }
                        },
                        TransitionOptions::default(),
                    );
                    engine.tick(Duration::ZERO, &mut tree);
                    (engine, tree)
                },
                |(mut engine, mut tree)| {
                    black_box(engine.tick(Duration::from_millis(100), &mut tree));
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flip);
criterion_main!(benches);
