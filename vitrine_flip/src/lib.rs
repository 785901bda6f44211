// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine FLIP: layout transitions by First, Last, Invert, Play.
//!
//! A FLIP transition records where elements are (First), lets the caller
//! apply a new layout (Last), computes the transform that would put each
//! element back where it was (Invert), and then animates that transform away
//! (Play). The layout itself changes instantly; only a visual transform and
//! opacity are animated, so the motion looks continuous.
//!
//! The engine does not know about any display tree. Elements are reached
//! through two small traits:
//! - [`Renderable`]: read geometry, write a visual transform and opacity,
//!   detach.
//! - [`RenderTree`]: keyed lookup of renderables.
//!
//! [`HeadlessTree`] implements both for tests and display-less hosts.
//!
//! The core pieces are:
//! - [`TransitionEngine`]: FLIP passes plus fade, slide, and the combined
//!   filter transition, driven by [`TransitionEngine::tick`].
//! - [`AnimationRegistry`]: the running-animation arena, at most one entry per
//!   element key, with constant-time lookup and removal.
//! - [`Batch`]: a completion handle that is also a [`Future`](core::future::Future).
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Rect;
//! use vitrine_flip::{HeadlessTree, TransitionEngine, TransitionOptions};
//!
//! let mut tree = HeadlessTree::new();
//! tree.insert("card", Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let mut engine = TransitionEngine::new();
//! let batch = engine.animate(
//!     &mut tree,
//!     &["card"],
//!     |tree| {
//!         // The caller applies the new layout.
//!         let _ = tree;
//!     },
//!     TransitionOptions::new(Duration::from_millis(300)),
//! );
//! // Nothing moved, so nothing animates and the batch is already settled.
//! assert!(batch.is_settled());
//! ```
//!
//! Cancellation is explicit and deterministic: a canceled animation leaves
//! its element at the animation's final target, never at an in-between value.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod batch;
mod easing;
mod engine;
mod frame;
mod registry;
mod render;

pub use batch::{Batch, BatchReport};
pub use easing::Easing;
pub use engine::{
    FADE_SCALE, FilterTransition, LayoutMutation, TransitionEngine, TransitionOptions,
};
pub use frame::{Frame, Geometry, Thresholds, TransformOrigin};
pub use registry::{AnimationId, AnimationRegistry};
pub use render::{HeadlessElement, HeadlessTree, RenderTree, Renderable};
