// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Layout: pure layout engines for image galleries.
//!
//! Every engine in this crate is a pure function from an ordered list of
//! intrinsic item sizes (plus a container size and a small parameter struct)
//! to a list of frames, one per item, in the same order. Nothing here owns
//! items, elements, or any scene graph; callers map the returned indices back
//! onto their own data.
//!
//! The engines are:
//! - [`grid_layout`]: a best-fit uniform grid. It searches every column count,
//!   keeps candidates whose cell size lies within [`GridParams::min_cell`] and
//!   [`GridParams::max_cell`], and picks the one that wastes the least space.
//! - [`row_layout`]: aspect-preserving rows at a fixed height, used for the
//!   deep-zoom coordinate space where the viewport does the framing.
//! - [`grouped_layout`]: one equal-width column slot per group key, with every
//!   group's stack sitting on a shared baseline and its label directly beneath.
//!
//! Small geometry helpers ([`fit_aspect`], [`center_in`], [`AspectRatio`]) are
//! exported as well, since hosts tend to need them for thumbnails.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use vitrine_layout::{GridParams, grid_layout};
//!
//! let items = [Size::new(300.0, 200.0); 12];
//! let params = GridParams::new(30.0, 200.0);
//! let grid = grid_layout(&items, Size::new(400.0, 300.0), &params).unwrap();
//!
//! assert_eq!((grid.cols, grid.rows), (4, 3));
//! assert!((grid.cell - 100.0).abs() < 1e-9);
//! ```
//!
//! Zero items always yields `None`; degenerate containers never panic and
//! fall back to a single column of minimum-size cells.

mod geometry;
mod grid;
mod grouped;
mod rows;

pub use geometry::{AspectRatio, center_in, fit_aspect, hit_test};
pub use grid::{GridFit, GridLayout, GridParams, grid_layout};
pub use grouped::{GroupBlock, GroupedItem, GroupedLayout, GroupedParams, grouped_layout};
pub use rows::{RowLayout, RowParams, row_layout};
