// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability interface for deep-zoom viewers.
//!
//! Tiled image viewers are external collaborators. All the explorer needs from
//! one is panning, zooming, coordinate mapping, and a way to pin overlays (hit
//! targets, selection outlines) to content-space rectangles.
//! [`OverlayViewport`] implements the trait over a plain [`Viewport`], so hosts
//! without a tiling viewer can use it directly.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::Viewport;

/// Identifier for an overlay pinned to content space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// What the explorer requires from a deep-zoom viewer.
pub trait DeepZoomProvider {
    /// Pans by a delta in screen space.
    fn pan_by(&mut self, delta: Vec2);

    /// Zooms by `factor` around a screen-space pivot. Returns `true` when the
    /// zoom level changed.
    fn zoom_by(&mut self, factor: f64, pivot: Point) -> bool;

    /// Current zoom factor.
    fn zoom(&self) -> f64;

    /// Maps a screen point into content coordinates.
    fn viewport_to_content(&self, pt: Point) -> Point;

    /// Maps a content point into screen coordinates.
    fn content_to_viewport(&self, pt: Point) -> Point;

    /// Pins an overlay to a content-space rectangle, replacing any overlay
    /// with the same id.
    fn attach_overlay(&mut self, id: OverlayId, content_rect: Rect);

    /// Removes an overlay. Returns `false` when it was not attached.
    fn detach_overlay(&mut self, id: OverlayId) -> bool;
}

/// A small set of overlays keyed by [`OverlayId`].
///
/// Lookups are linear; overlay counts are expected to be small (a selection
/// outline, a handful of hit targets).
#[derive(Clone, Debug, Default)]
pub struct OverlaySet {
    entries: Vec<(OverlayId, Rect)>,
}

impl OverlaySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an overlay.
    pub fn attach(&mut self, id: OverlayId, rect: Rect) {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = rect,
            None => self.entries.push((id, rect)),
        }
    }

    /// Removes an overlay, returning whether it existed.
    pub fn detach(&mut self, id: OverlayId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != id);
        self.entries.len() != before
    }

    /// Returns the content rectangle of an overlay.
    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<Rect> {
        self.entries.iter().find(|(k, _)| *k == id).map(|(_, r)| *r)
    }

    /// Iterates overlays in attach order.
    pub fn iter(&self) -> impl Iterator<Item = (OverlayId, Rect)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of attached overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no overlays are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A [`Viewport`] paired with its overlays, usable wherever a
/// [`DeepZoomProvider`] is expected.
#[derive(Clone, Debug)]
pub struct OverlayViewport {
    /// The underlying viewport.
    pub viewport: Viewport,
    /// Overlays pinned to content space.
    pub overlays: OverlaySet,
}

impl OverlayViewport {
    /// Wraps a viewport with an empty overlay set.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            overlays: OverlaySet::new(),
        }
    }

    /// Screen-space rectangle of an overlay under the current pan/zoom.
    #[must_use]
    pub fn overlay_screen_rect(&self, id: OverlayId) -> Option<Rect> {
        self.overlays
            .get(id)
            .map(|r| self.viewport.content_to_screen_rect(r))
    }
}

impl DeepZoomProvider for OverlayViewport {
    fn pan_by(&mut self, delta: Vec2) {
        self.viewport.pan_by(delta);
    }

    fn zoom_by(&mut self, factor: f64, pivot: Point) -> bool {
        self.viewport.zoom_by(factor, pivot)
    }

    fn zoom(&self) -> f64 {
        self.viewport.scale()
    }

    fn viewport_to_content(&self, pt: Point) -> Point {
        self.viewport.screen_to_content(pt)
    }

    fn content_to_viewport(&self, pt: Point) -> Point {
        self.viewport.content_to_screen(pt)
    }

    fn attach_overlay(&mut self, id: OverlayId, content_rect: Rect) {
        self.overlays.attach(id, content_rect);
    }

    fn detach_overlay(&mut self, id: OverlayId) -> bool {
        self.overlays.detach(id)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{DeepZoomProvider, OverlayId, OverlayViewport};
    use crate::{ClampMode, Viewport};

    #[test]
    fn overlays_follow_zoom() {
        let mut view = Viewport::new(Size::new(100.0, 100.0));
        view.set_clamp_mode(ClampMode::None);
        let mut provider = OverlayViewport::new(view);

        provider.attach_overlay(OverlayId(7), Rect::new(10.0, 10.0, 20.0, 20.0));
        assert!(provider.zoom_by(2.0, Point::ZERO));
        assert_eq!(
            provider.overlay_screen_rect(OverlayId(7)),
            Some(Rect::new(20.0, 20.0, 40.0, 40.0))
        );

        let content = provider.viewport_to_content(Point::new(30.0, 30.0));
        assert_eq!(content, Point::new(15.0, 15.0));
        assert_eq!(provider.content_to_viewport(content), Point::new(30.0, 30.0));

        assert!(provider.detach_overlay(OverlayId(7)));
        assert!(!provider.detach_overlay(OverlayId(7)));
        assert!(provider.overlays.is_empty());
    }

    #[test]
    fn attach_replaces_existing_overlay() {
        let mut provider = OverlayViewport::new(Viewport::new(Size::new(10.0, 10.0)));
        provider.attach_overlay(OverlayId(1), Rect::new(0.0, 0.0, 1.0, 1.0));
        provider.attach_overlay(OverlayId(1), Rect::new(2.0, 2.0, 3.0, 3.0));
        assert_eq!(provider.overlays.len(), 1);
        assert_eq!(
            provider.overlays.get(OverlayId(1)),
            Some(Rect::new(2.0, 2.0, 3.0, 3.0))
        );
    }
}
