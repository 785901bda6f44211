// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine: application state for a visual explorer of image collections.
//!
//! This crate wires the Vitrine building blocks into one reducer:
//! - [`vitrine_facets`] decides which items are visible and in what order.
//! - [`vitrine_layout`] turns the visible set into frames.
//! - [`vitrine_flip`] animates the scene from the old frames to the new ones.
//! - [`vitrine_view2d`] keeps the arrangement framed, pannable and zoomable.
//!
//! The host feeds [`Action`]s into [`Explorer::dispatch`] (user input and
//! display-frame ticks) and draws [`Explorer::scene`] through
//! [`Explorer::viewport`]. There is no hidden state: rendering is a
//! projection of the explorer.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Size;
//! use vitrine::{Action, Explorer, ExplorerConfig};
//! use vitrine_facets::{Item, Manifest};
//!
//! let items = (0..20)
//!     .map(|i| {
//!         let vertical = if i % 4 == 0 { "Travel" } else { "Auto" };
//!         Item::new(format!("ad-{i}"), 300.0, 250.0).with_attr("vertical", vertical)
//!     })
//!     .collect();
//! let manifest = Manifest::from_items(items).unwrap();
//! let mut explorer =
//!     Explorer::new(manifest, Size::new(800.0, 600.0), ExplorerConfig::default());
//! assert_eq!(explorer.stats().visible, 20);
//!
//! explorer.dispatch(Action::ToggleFilter {
//!     attribute: "vertical".into(),
//!     value: "Auto".into(),
//! });
//! assert_eq!(explorer.stats().visible, 15);
//!
//! // Drive frames until the transition settles.
//! let mut now = Duration::ZERO;
//! while explorer.dispatch(Action::Tick(now)) {
//!     now += Duration::from_millis(16);
//! }
//! ```
//!
//! Configuration comes from [`ExplorerConfig`], which deserializes from JSON
//! with every field optional.

mod arrange;
mod config;
mod debounce;
mod explorer;

pub use arrange::{Arrangement, GroupLabel, LayoutMode};
pub use config::{
    ConfigError, DeepZoomConfig, EasingConfig, ExplorerConfig, GridConfig, GroupedConfig,
    TransitionConfig, ViewportConfig,
};
pub use debounce::ResizeDebounce;
pub use explorer::{Action, Explorer, SELECTION_OVERLAY, SceneKey, Stats};
