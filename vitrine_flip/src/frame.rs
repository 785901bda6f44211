// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry records and the animatable frame they are inverted into.

use kurbo::{Affine, Point, Rect, Vec2};

/// On-screen geometry of one element at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Visual bounds, including any transform currently applied.
    pub rect: Rect,
    /// Effective opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Geometry {
    /// Creates a geometry record.
    #[must_use]
    pub fn new(rect: Rect, opacity: f64) -> Self {
        Self { rect, opacity }
    }
}

/// Point a frame's scale is applied around, relative to the element's box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransformOrigin {
    /// The top-left corner; used for FLIP inversion.
    #[default]
    TopLeft,
    /// The box center; used for fades so elements shrink in place.
    Center,
}

impl TransformOrigin {
    fn resolve(self, rect: Rect) -> Point {
        match self {
            Self::TopLeft => rect.origin(),
            Self::Center => rect.center(),
        }
    }
}

/// One animatable state: translation, non-uniform scale, and opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Translation in parent coordinates.
    pub translate: Vec2,
    /// Scale factors along x and y.
    pub scale: Vec2,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Frame {
    /// Identity transform at the given opacity.
    #[must_use]
    pub const fn identity(opacity: f64) -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            opacity,
        }
    }

    /// The frame that makes an element laid out at `last` appear at `first`.
    ///
    /// Scaling is around the top-left corner. An empty `last` box keeps a
    /// scale of `1` on that axis instead of dividing by zero.
    #[must_use]
    pub fn invert(first: Geometry, last: Geometry) -> Self {
        let ratio = |f: f64, l: f64| if l > 0.0 && f.is_finite() { f / l } else { 1.0 };
        Self {
            translate: first.rect.origin() - last.rect.origin(),
            scale: Vec2::new(
                ratio(first.rect.width(), last.rect.width()),
                ratio(first.rect.height(), last.rect.height()),
            ),
            opacity: first.opacity,
        }
    }

    /// Returns `true` when the frame has no translation and unit scale.
    #[must_use]
    pub fn is_identity_transform(&self) -> bool {
        self.translate == Vec2::ZERO && self.scale == Vec2::new(1.0, 1.0)
    }

    /// Linear interpolation between two frames.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            translate: self.translate.lerp(to.translate, t),
            scale: self.scale.lerp(to.scale, t),
            opacity: self.opacity + (to.opacity - self.opacity) * t,
        }
    }

    /// Affine transform for an element whose layout box is `base`.
    #[must_use]
    pub fn to_affine(&self, base: Rect, origin: TransformOrigin) -> Affine {
        if self.is_identity_transform() {
            return Affine::IDENTITY;
        }
        let o = origin.resolve(base).to_vec2();
        Affine::translate(o + self.translate)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-o)
    }
}

/// Deltas below which a FLIP pass skips an element entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Translation below this many pixels on both axes is invisible.
    pub translate: f64,
    /// Relative scale change below this on both axes is invisible.
    pub scale: f64,
    /// Opacity change below this is invisible.
    pub opacity: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            translate: 1.0,
            scale: 0.01,
            opacity: 0.01,
        }
    }
}

impl Thresholds {
    /// Returns `true` when animating from `from` to `to` would not be visible.
    #[must_use]
    pub fn is_negligible(&self, from: &Frame, to: &Frame) -> bool {
        let d = from.translate - to.translate;
        d.x.abs() < self.translate
            && d.y.abs() < self.translate
            && (from.scale.x - to.scale.x).abs() < self.scale
            && (from.scale.y - to.scale.y).abs() < self.scale
            && (from.opacity - to.opacity).abs() < self.opacity
    }
}
