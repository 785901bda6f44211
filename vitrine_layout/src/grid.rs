// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-fit uniform grid.

use kurbo::{Point, Rect, Size};

use crate::geometry::{center_in, fit_aspect, hit_test};

/// Parameters for [`grid_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    /// Smallest admissible cell edge; anything smaller is not legible.
    pub min_cell: f64,
    /// Largest admissible cell edge; anything larger wastes the canvas.
    pub max_cell: f64,
    /// Space between adjacent cells, on both axes.
    pub gap: f64,
}

const DEFAULT_MIN_CELL: f64 = 30.0;
const DEFAULT_MAX_CELL: f64 = 200.0;

impl GridParams {
    /// Creates parameters with the given cell bounds and no gap.
    ///
    /// The bounds are normalized so that `min_cell <= max_cell`; a
    /// non-finite bound falls back to its default.
    #[must_use]
    pub fn new(min_cell: f64, max_cell: f64) -> Self {
        Self {
            min_cell,
            max_cell,
            gap: 0.0,
        }
        .sanitized()
    }

    /// Copy with finite, non-negative bounds in order and a usable gap.
    ///
    /// The fields are public, so [`grid_layout`] runs this on whatever it is
    /// given.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let bound = |v: f64, default: f64| if v.is_finite() { v.max(0.0) } else { default };
        let min_cell = bound(self.min_cell, DEFAULT_MIN_CELL);
        let max_cell = bound(self.max_cell, DEFAULT_MAX_CELL);
        Self {
            min_cell: min_cell.min(max_cell),
            max_cell: max_cell.max(min_cell),
            gap: bound(self.gap, 0.0),
        }
    }

    /// Sets the gap between cells.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        self
    }

    fn admits(&self, cell: f64) -> bool {
        cell >= self.min_cell && cell <= self.max_cell
    }

    /// Distance from `cell` to the admissible range, zero when inside it.
    fn distance(&self, cell: f64) -> f64 {
        if cell < self.min_cell {
            self.min_cell - cell
        } else if cell > self.max_cell {
            cell - self.max_cell
        } else {
            0.0
        }
    }
}

impl Default for GridParams {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CELL, DEFAULT_MAX_CELL)
    }
}

/// How the chosen column count was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridFit {
    /// The cell size fills the container and lies within the configured bounds.
    Exact,
    /// No column count produced an admissible cell; the closest candidate was
    /// taken and its cell clamped into range. The grid may overflow or
    /// underfill the container.
    Clamped,
}

/// Result of [`grid_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Number of columns.
    pub cols: usize,
    /// Number of rows, `ceil(len / cols)`.
    pub rows: usize,
    /// Edge length of each square cell.
    pub cell: f64,
    /// Whether the cell size came from an admissible candidate.
    pub fit: GridFit,
    /// Bounds of the whole grid, centered in the container.
    pub bounds: Rect,
    /// Cell rectangles in item order.
    pub cells: Vec<Rect>,
    /// Item frames in item order, aspect-fitted and centered inside each cell.
    pub frames: Vec<Rect>,
}

impl GridLayout {
    /// Returns the index of the item whose frame contains `pt`.
    #[must_use]
    pub fn item_at(&self, pt: Point) -> Option<usize> {
        hit_test(&self.frames, pt)
    }

    /// Wasted space of this grid against `container`.
    #[must_use]
    pub fn wastage(&self, container: Size) -> f64 {
        wastage(self.bounds.size(), container)
    }
}

fn wastage(grid: Size, container: Size) -> f64 {
    (container.width - grid.width).abs() + (container.height - grid.height).abs()
}

fn span(count: usize, cell: f64, gap: f64) -> f64 {
    let n = count as f64;
    n * cell + (n - 1.0).max(0.0) * gap
}

/// Cell edge that makes `count` cells plus gaps exactly fill `extent`.
fn fill_cell(extent: f64, count: usize, gap: f64) -> f64 {
    let n = count as f64;
    ((extent - (n - 1.0) * gap) / n).max(0.0)
}

#[derive(Clone, Copy)]
struct Candidate {
    cols: usize,
    rows: usize,
    cell: f64,
    waste: f64,
}

/// Lays out `items` in a uniform square-cell grid that best fills `container`.
///
/// Every column count in `1..=len` is tried. For each, the cell edge is the
/// smaller of the width-derived and height-derived edge that would make the
/// grid exactly fill the container. Candidates whose edge falls outside
/// `[min_cell, max_cell]` are rejected; the remaining candidate with the least
/// `|W - grid_w| + |H - grid_h|` wins, ties going to the lower column count.
///
/// Returns `None` for an empty item list.
#[must_use]
pub fn grid_layout(items: &[Size], container: Size, params: &GridParams) -> Option<GridLayout> {
    let len = items.len();
    if len == 0 {
        return None;
    }
    let params = &params.sanitized();
    let width = sanitize(container.width);
    let height = sanitize(container.height);
    let container = Size::new(width, height);

    let mut best: Option<Candidate> = None;
    let mut nearest: Option<(f64, Candidate)> = None;
    for cols in 1..=len {
        let rows = len.div_ceil(cols);
        let cell = fill_cell(width, cols, params.gap).min(fill_cell(height, rows, params.gap));
        let grid = Size::new(span(cols, cell, params.gap), span(rows, cell, params.gap));
        let candidate = Candidate {
            cols,
            rows,
            cell,
            waste: wastage(grid, container),
        };
        if params.admits(cell) {
            if best.is_none_or(|b| candidate.waste < b.waste) {
                best = Some(candidate);
            }
        } else {
            let distance = params.distance(cell);
            if nearest.is_none_or(|(d, _)| distance < d) {
                nearest = Some((distance, candidate));
            }
        }
    }

    let (chosen, fit) = match (best, nearest) {
        (Some(c), _) => (c, GridFit::Exact),
        (None, Some((_, c))) => (
            Candidate {
                cell: c.cell.clamp(params.min_cell, params.max_cell),
                ..c
            },
            GridFit::Clamped,
        ),
        (None, None) => return None,
    };

    Some(place(items, container, params.gap, chosen, fit))
}

fn place(items: &[Size], container: Size, gap: f64, c: Candidate, fit: GridFit) -> GridLayout {
    let grid = Size::new(span(c.cols, c.cell, gap), span(c.rows, c.cell, gap));
    let bounds = center_in(grid, Rect::from_origin_size(Point::ORIGIN, container));
    let stride = c.cell + gap;

    let mut cells = Vec::with_capacity(items.len());
    let mut frames = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let col = (i % c.cols) as f64;
        let row = (i / c.cols) as f64;
        let cell = Rect::from_origin_size(
            Point::new(bounds.x0 + col * stride, bounds.y0 + row * stride),
            Size::new(c.cell, c.cell),
        );
        frames.push(center_in(fit_aspect(*item, cell.size()), cell));
        cells.push(cell);
    }

    GridLayout {
        cols: c.cols,
        rows: c.rows,
        cell: c.cell,
        fit,
        bounds,
        cells,
        frames,
    }
}

fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}
