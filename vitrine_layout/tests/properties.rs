// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the layout engines.

use kurbo::Size;
use proptest::prelude::*;
use vitrine_layout::{
    GridFit, GridParams, GroupedItem, GroupedParams, grid_layout, grouped_layout,
};

const KEYS: [&str; 5] = ["auto", "beauty", "finance", "food", "travel"];

/// Brute-force wastage for a given column count, mirroring the engine's rules.
fn candidate(len: usize, cols: usize, container: Size, params: &GridParams) -> (f64, f64) {
    let rows = len.div_ceil(cols);
    let fill =
        |extent: f64, n: usize| ((extent - (n as f64 - 1.0) * params.gap) / n as f64).max(0.0);
    let cell = fill(container.width, cols).min(fill(container.height, rows));
    let span = |n: usize| n as f64 * cell + (n as f64 - 1.0).max(0.0) * params.gap;
    let waste = (container.width - span(cols)).abs() + (container.height - span(rows)).abs();
    (cell, waste)
}

proptest! {
    #[test]
    fn grid_choice_is_admissible_and_least_wasteful(
        len in 1_usize..80,
        width in 0.0_f64..2_000.0,
        height in 0.0_f64..2_000.0,
        min_cell in 10.0_f64..60.0,
        spread in 0.0_f64..300.0,
        gap in 0.0_f64..12.0,
    ) {
        let params = GridParams::new(min_cell, min_cell + spread).with_gap(gap);
        let container = Size::new(width, height);
        let items = vec![Size::new(4.0, 3.0); len];
        let grid = grid_layout(&items, container, &params).unwrap();

        prop_assert!(grid.cell >= params.min_cell - 1e-9);
        prop_assert!(grid.cell <= params.max_cell + 1e-9);
        prop_assert_eq!(grid.frames.len(), len);

        if grid.fit == GridFit::Exact {
            let chosen = grid.wastage(container);
            for cols in 1..=len {
                let (cell, waste) = candidate(len, cols, container, &params);
                if cell >= params.min_cell && cell <= params.max_cell {
                    prop_assert!(
                        chosen <= waste + 1e-6,
                        "cols {} wastes {} < {}",
                        cols,
                        waste,
                        chosen
                    );
                }
            }
        } else {
            for cols in 1..=len {
                let (cell, _) = candidate(len, cols, container, &params);
                prop_assert!(cell < params.min_cell || cell > params.max_cell);
            }
        }
    }

    #[test]
    fn grouped_labels_share_one_baseline(
        picks in proptest::collection::vec(0_usize..KEYS.len(), 1..60),
        width in 0.0_f64..1_500.0,
    ) {
        let items: Vec<GroupedItem<'_>> = picks
            .iter()
            .map(|&k| GroupedItem { group: KEYS[k], size: Size::new(3.0, 2.0) })
            .collect();
        let params = GroupedParams::default();
        let layout = grouped_layout(&items, width, &params).unwrap();

        let label_y = layout.baseline + params.label_margin;
        for group in &layout.groups {
            prop_assert!((group.label_anchor.y - label_y).abs() < 1e-9);
            prop_assert!((group.block.y1 - layout.baseline).abs() < 1e-9);
        }
        let members: usize = layout.groups.iter().map(|g| g.members.len()).sum();
        prop_assert_eq!(members, items.len());
    }
}
