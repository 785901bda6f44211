// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine View 2D: a pan/zoom viewport for gallery canvases.
//!
//! This crate provides a small, headless model of a content plane shown
//! through a container. It focuses on:
//! - Scale/translation state with min/max zoom.
//! - Zooming toward a pivot so the content under the pointer stays put.
//! - Fitting content into the container and keeping it framed while panning.
//! - Converting between screen (container-local) and content coordinates.
//! - A [`PanGesture`] state machine for background drags.
//! - A [`DeepZoomProvider`] capability trait for tiled image viewers.
//!
//! It does **not** own any scene graph, rendering backend, or event loop.
//! Callers feed pointer and wheel input into the operations here and read
//! [`Viewport::content_to_screen_transform`] back when positioning content.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use vitrine_view2d::Viewport;
//!
//! let mut view = Viewport::new(Size::new(800.0, 600.0));
//! view.fit_to_viewport(Rect::new(0.0, 0.0, 1600.0, 600.0), Size::new(800.0, 600.0), 1.0);
//! assert_eq!(view.scale(), 0.5);
//!
//! // Zoom in around the container center.
//! let center = Point::new(400.0, 300.0);
//! let before = view.screen_to_content(center);
//! view.zoom_by(1.3, center);
//! let after = view.screen_to_content(center);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and there is no rotation.
//! - All operations are infallible. Non-finite or non-positive inputs are
//!   ignored, and degenerate container or content sizes reset the viewport to
//!   scale `1` with zero translation rather than producing NaNs.
//! - Clamping treats each axis independently; see [`Viewport::constrain_pan`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod modes;
mod pan;
mod provider;
mod viewport;

pub use modes::{ClampMode, FitMode};
pub use pan::PanGesture;
pub use provider::{DeepZoomProvider, OverlayId, OverlaySet, OverlayViewport};
pub use viewport::{DEFAULT_ZOOM_STEP, Viewport, ViewportDebugInfo};
