// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::modes::{ClampMode, FitMode};

/// Default multiplicative step used by [`Viewport::zoom_in`] and [`Viewport::zoom_out`].
pub const DEFAULT_ZOOM_STEP: f64 = 1.3;

/// Pan/zoom state over a content plane shown inside a container.
///
/// A content point `p` appears on screen at `p * scale + translation`, where
/// screen coordinates are relative to the container's top-left corner. The
/// viewport can be used to:
/// - Convert points and rectangles between screen and content coordinates.
/// - Zoom toward a pivot so the content under it stays put.
/// - Fit content into the container and keep it framed while panning.
#[derive(Clone, Debug)]
pub struct Viewport {
    container: Size,
    content: Option<Rect>,
    scale: f64,
    translation: Vec2,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
    clamp_mode: ClampMode,
    fit_mode: FitMode,
    content_to_screen: Affine,
    screen_to_content: Affine,
}

impl Viewport {
    /// Creates a viewport over a container of the given size.
    ///
    /// - Initial scale is `1.0` and translation is zero.
    /// - Scale is clamped to the range `[0.1, 10.0]` by default.
    /// - No content bounds are set, so [`Viewport::constrain_pan`] is a no-op
    ///   until [`Viewport::set_content_bounds`] or
    ///   [`Viewport::fit_to_viewport`] is called.
    #[must_use]
    pub fn new(container: Size) -> Self {
        let mut vp = Self {
            container: sanitize_size(container),
            content: None,
            scale: 1.0,
            translation: Vec2::ZERO,
            min_scale: 0.1,
            max_scale: 10.0,
            zoom_step: DEFAULT_ZOOM_STEP,
            clamp_mode: ClampMode::default(),
            fit_mode: FitMode::default(),
            content_to_screen: Affine::IDENTITY,
            screen_to_content: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the container size.
    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Sets the container size, re-applying clamping.
    ///
    /// Scale and translation are otherwise untouched; hosts that want the
    /// content re-fitted call [`Viewport::fit_to_viewport`] afterwards.
    pub fn set_container(&mut self, container: Size) {
        let container = sanitize_size(container);
        if self.container == container {
            return;
        }
        self.container = container;
        self.clamp();
    }

    /// Returns the content bounds used for clamping, if any.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.content
    }

    /// Sets the content bounds used for clamping.
    pub fn set_content_bounds(&mut self, bounds: Option<Rect>) {
        let bounds = bounds.filter(|b| is_finite_rect(*b));
        if self.content == bounds {
            return;
        }
        self.content = bounds;
        self.clamp();
    }

    /// Returns the current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the scale as a percentage, for zoom readouts.
    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.scale * 100.0
    }

    /// Returns the current translation in screen coordinates.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Returns `(min_scale, max_scale)`.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Sets the minimum and maximum scale.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`. The
    /// current scale is clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        if !is_positive(min_scale) || !is_positive(max_scale) {
            return;
        }
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// Sets the factor used by [`Viewport::zoom_in`] and [`Viewport::zoom_out`].
    pub fn set_zoom_step(&mut self, step: f64) {
        if is_positive(step) && step != 1.0 {
            self.zoom_step = step;
        }
    }

    /// Sets the clamp mode.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        if self.clamp_mode != mode {
            self.clamp_mode = mode;
            self.clamp();
        }
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets how fitted content should be positioned inside the container.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Returns the current fit mode.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Sets the scale directly, clamped into the configured range, keeping the
    /// content origin's screen position.
    pub fn set_scale(&mut self, scale: f64) {
        if !is_positive(scale) {
            return;
        }
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        if (self.scale - clamped).abs() < f64::EPSILON {
            return;
        }
        self.scale = clamped;
        self.clamp();
    }

    /// Sets the translation directly, then applies clamping.
    pub fn set_translation(&mut self, translation: Vec2) {
        if !translation.is_finite() || self.translation == translation {
            return;
        }
        self.translation = translation;
        self.clamp();
    }

    /// Pans by a delta in screen space.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return;
        }
        self.translation += delta;
        self.clamp();
    }

    /// Zooms by `factor` while keeping the content under `pivot` (a screen
    /// point) at the same screen position.
    ///
    /// The new scale is `clamp(scale * factor, min_scale, max_scale)` and the
    /// translation follows `t' = pivot - (pivot - t) * (new / old)`. Returns
    /// `false` and leaves the state untouched when the clamped scale equals
    /// the current one or `factor` is not a positive finite number.
    pub fn zoom_by(&mut self, factor: f64, pivot: Point) -> bool {
        if !is_positive(factor) || !pivot.is_finite() {
            return false;
        }
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - old_scale).abs() < f64::EPSILON {
            return false;
        }
        let pivot = pivot.to_vec2();
        self.translation = pivot - (pivot - self.translation) * (new_scale / old_scale);
        self.scale = new_scale;
        self.clamp();
        true
    }

    /// Zooms in by the configured step around the container center.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(self.zoom_step, self.container_center())
    }

    /// Zooms out by the configured step around the container center.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(1.0 / self.zoom_step, self.container_center())
    }

    /// Fits `content` into `container`, preserving aspect ratio.
    ///
    /// The scale is `clamp(min(cw / w, ch / h), min_scale, max_fit_scale)`; the
    /// content is then positioned per [`FitMode`]. `content` becomes the
    /// clamping bounds. Degenerate sizes reset to scale `1` and zero
    /// translation instead of producing NaNs.
    pub fn fit_to_viewport(&mut self, content: Rect, container: Size, max_fit_scale: f64) {
        self.container = sanitize_size(container);
        let content = content.abs();
        if !is_finite_rect(content)
            || content.width() <= 0.0
            || content.height() <= 0.0
            || self.container.width <= 0.0
            || self.container.height <= 0.0
        {
            self.content = None;
            self.reset();
            return;
        }
        self.content = Some(content);

        let sx = self.container.width / content.width();
        let sy = self.container.height / content.height();
        let upper = if is_positive(max_fit_scale) {
            max_fit_scale.max(self.min_scale)
        } else {
            self.max_scale
        };
        let scale = sx.min(sy).clamp(self.min_scale, upper);
        self.scale = scale;

        self.translation = match self.fit_mode {
            FitMode::Center => {
                let container_center = Vec2::new(self.container.width, self.container.height) * 0.5;
                container_center - content.center().to_vec2() * scale
            }
            FitMode::AlignMin => -content.origin().to_vec2() * scale,
        };
        self.clamp();
    }

    /// Re-fits the current content bounds into the current container.
    ///
    /// No-op without content bounds. Calling this repeatedly yields the same
    /// state, which makes it safe to run from a debounced resize handler.
    pub fn refit(&mut self, max_fit_scale: f64) {
        if let Some(content) = self.content {
            self.fit_to_viewport(content, self.container, max_fit_scale);
        }
    }

    /// Resets to scale `1` and zero translation.
    pub fn reset(&mut self) {
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
        self.translation = Vec2::ZERO;
        self.rebuild_transforms();
    }

    /// Keeps the content framed within the container, axis by axis.
    ///
    /// When the scaled content is smaller than the container on an axis, it is
    /// centered on that axis. Otherwise the translation is clamped so that the
    /// content edges never recede past the container edges. No-op without
    /// content bounds.
    pub fn constrain_pan(&mut self) {
        if let Some(content) = self.content {
            let scale = self.scale;
            self.translation = Vec2::new(
                constrain_axis(
                    self.translation.x,
                    content.x0 * scale,
                    content.width() * scale,
                    self.container.width,
                ),
                constrain_axis(
                    self.translation.y,
                    content.y0 * scale,
                    content.height() * scale,
                    self.container.height,
                ),
            );
        }
        self.rebuild_transforms();
    }

    /// Returns the content-space rectangle currently visible in the container.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        self.screen_to_content_rect(Rect::from_origin_size(Point::ORIGIN, self.container))
    }

    /// Transform mapping content coordinates to screen coordinates.
    #[must_use]
    pub fn content_to_screen_transform(&self) -> Affine {
        self.content_to_screen
    }

    /// Converts a content-space point into screen coordinates.
    #[must_use]
    pub fn content_to_screen(&self, pt: Point) -> Point {
        self.content_to_screen * pt
    }

    /// Converts a screen-space point into content coordinates.
    #[must_use]
    pub fn screen_to_content(&self, pt: Point) -> Point {
        self.screen_to_content * pt
    }

    /// Converts a content-space rectangle into screen coordinates.
    #[must_use]
    pub fn content_to_screen_rect(&self, rect: Rect) -> Rect {
        // Scale is uniform and positive, so transforming the two corners is
        // enough for this axis-aligned transform.
        Rect::from_points(
            self.content_to_screen * rect.origin(),
            self.content_to_screen * Point::new(rect.x1, rect.y1),
        )
    }

    /// Converts a screen-space rectangle into content coordinates.
    #[must_use]
    pub fn screen_to_content_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.screen_to_content * rect.origin(),
            self.screen_to_content * Point::new(rect.x1, rect.y1),
        )
    }

    /// Snapshot of the current viewport state for debugging and readouts.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            container: self.container,
            content_bounds: self.content,
            visible_content_rect: self.visible_content_rect(),
            scale: self.scale,
            translation: self.translation,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            clamp_mode: self.clamp_mode,
            fit_mode: self.fit_mode,
        }
    }

    fn container_center(&self) -> Point {
        Point::new(self.container.width * 0.5, self.container.height * 0.5)
    }

    fn clamp(&mut self) {
        match self.clamp_mode {
            ClampMode::None => self.rebuild_transforms(),
            ClampMode::Contain => self.constrain_pan(),
        }
    }

    fn rebuild_transforms(&mut self) {
        // Content → screen: scale, then translate.
        self.content_to_screen = Affine::translate(self.translation) * Affine::scale(self.scale);
        self.screen_to_content = self.content_to_screen.inverse();
    }
}

/// Constrains one axis of the translation.
///
/// `offset` is the scaled content origin and `extent` the scaled content size.
/// The "smaller than the container" test is strict, so at the exact-fit
/// boundary the clamp branch runs and pins the content edges to the container
/// edges, which coincides with centering.
fn constrain_axis(translation: f64, offset: f64, extent: f64, container: f64) -> f64 {
    if extent < container {
        (container - extent) * 0.5 - offset
    } else {
        let min = container - extent - offset;
        let max = -offset;
        translation.clamp(min, max)
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn is_finite_rect(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

fn sanitize_size(size: Size) -> Size {
    let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Size::new(clean(size.width), clean(size.height))
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Current container size.
    pub container: Size,
    /// Content bounds used for fitting and clamping.
    pub content_bounds: Option<Rect>,
    /// Content-space rectangle currently visible.
    pub visible_content_rect: Rect,
    /// Current scale factor.
    pub scale: f64,
    /// Current translation in screen coordinates.
    pub translation: Vec2,
    /// Minimum scale factor.
    pub min_scale: f64,
    /// Maximum scale factor.
    pub max_scale: f64,
    /// Clamp mode applied after pan and zoom.
    pub clamp_mode: ClampMode,
    /// Fit mode used by [`Viewport::fit_to_viewport`].
    pub fit_mode: FitMode,
}
