// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aspect-preserving rows for the deep-zoom coordinate space.

use kurbo::{Point, Rect, Size};

use crate::geometry::{AspectRatio, hit_test};

/// Parameters for [`row_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowParams {
    /// Height every item is normalized to.
    pub row_height: f64,
    /// Horizontal and vertical spacing between items.
    pub gap: f64,
    /// Bias toward wide arrangements; the column count is
    /// `ceil(sqrt(len * widen_factor))`.
    pub widen_factor: f64,
}

impl Default for RowParams {
    fn default() -> Self {
        Self {
            row_height: 1.0,
            gap: 0.05,
            widen_factor: 2.0,
        }
    }
}

/// Result of [`row_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    /// Number of items per row.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
    /// Item frames in item order.
    pub frames: Vec<Rect>,
    /// Bounds enclosing every frame, anchored at the origin.
    pub content: Rect,
}

impl RowLayout {
    /// Returns the index of the item whose frame contains `pt`.
    #[must_use]
    pub fn item_at(&self, pt: Point) -> Option<usize> {
        hit_test(&self.frames, pt)
    }
}

/// Column count for `len` items; always within `1..=len` for `len > 0`.
fn column_count(len: usize, widen_factor: f64) -> usize {
    let widen = if widen_factor.is_finite() && widen_factor > 0.0 {
        widen_factor
    } else {
        1.0
    };
    let cols = ((len as f64) * widen).sqrt().ceil();
    // `cols` is finite and non-negative here; the clamp keeps it in range.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is a small non-negative integer-valued float"
    )]
    let cols = cols as usize;
    cols.clamp(1, len.max(1))
}

/// Packs items left-to-right, top-to-bottom at a fixed row height.
///
/// Each item keeps its intrinsic aspect ratio: width is `row_height * ratio`.
/// Rows hold a fixed number of items, so row widths vary with content. The
/// returned coordinates are meant to be framed by a viewport rather than fit
/// into a container directly.
///
/// Returns `None` for an empty item list.
#[must_use]
pub fn row_layout(items: &[Size], params: &RowParams) -> Option<RowLayout> {
    if items.is_empty() {
        return None;
    }
    let row_height = if params.row_height > 0.0 {
        params.row_height
    } else {
        1.0
    };
    let gap = params.gap.max(0.0);
    let cols = column_count(items.len(), params.widen_factor);
    let rows = items.len().div_ceil(cols);

    let mut frames = Vec::with_capacity(items.len());
    let mut max_x = 0.0_f64;
    for (row, chunk) in items.chunks(cols).enumerate() {
        let y = row as f64 * (row_height + gap);
        let mut x = 0.0;
        for item in chunk {
            let width = AspectRatio::from_size(*item).width_for_height(row_height);
            frames.push(Rect::from_origin_size(
                Point::new(x, y),
                Size::new(width, row_height),
            ));
            x += width + gap;
        }
        max_x = max_x.max(x - gap);
    }
    let height = rows as f64 * row_height + (rows as f64 - 1.0) * gap;

    Some(RowLayout {
        cols,
        rows,
        frames,
        content: Rect::new(0.0, 0.0, max_x, height),
    })
}
