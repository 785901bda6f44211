// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle and aspect-ratio helpers shared by the layout engines.

use kurbo::{Point, Rect, Size};

/// Width-over-height ratio of an item.
///
/// Non-finite or non-positive sizes are treated as square so that a single
/// broken manifest entry cannot poison a layout with NaNs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// A 1:1 ratio.
    pub const SQUARE: Self = Self(1.0);

    /// Derives the ratio of `size`, falling back to [`AspectRatio::SQUARE`].
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        let ratio = size.width / size.height;
        if size.width > 0.0 && size.height > 0.0 && ratio.is_finite() {
            Self(ratio)
        } else {
            Self::SQUARE
        }
    }

    /// Returns the raw width / height value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Width of an item with this ratio at the given height.
    #[must_use]
    pub fn width_for_height(self, height: f64) -> f64 {
        height * self.0
    }
}

/// Largest size with the aspect ratio of `intrinsic` that fits inside `bounds`.
#[must_use]
pub fn fit_aspect(intrinsic: Size, bounds: Size) -> Size {
    let bw = bounds.width.max(0.0);
    let bh = bounds.height.max(0.0);
    let ratio = AspectRatio::from_size(intrinsic).get();
    if bw / bh.max(f64::MIN_POSITIVE) > ratio {
        Size::new(bh * ratio, bh)
    } else {
        Size::new(bw, bw / ratio)
    }
}

/// Places `size` in the middle of `container` using a symmetric offset.
///
/// When `size` is larger than the container the offset goes negative, so the
/// overflow is split evenly on both sides.
#[must_use]
pub fn center_in(size: Size, container: Rect) -> Rect {
    let x = container.x0 + (container.width() - size.width) * 0.5;
    let y = container.y0 + (container.height() - size.height) * 0.5;
    Rect::from_origin_size(Point::new(x, y), size)
}

/// Returns the index of the topmost frame containing `pt`.
///
/// Frames later in the slice are considered on top, matching paint order.
#[must_use]
pub fn hit_test(frames: &[Rect], pt: Point) -> Option<usize> {
    frames.iter().rposition(|frame| {
        pt.x >= frame.x0 && pt.x < frame.x1 && pt.y >= frame.y0 && pt.y < frame.y1
    })
}
