// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture: turn pointer drags over the background into viewport translation.
//!
//! ## Usage
//!
//! 1) On pointer-down, call [`PanGesture::begin`] with the pointer position and
//!    whether the pointer is over an interactive item. Presses over items never
//!    start a pan.
//! 2) On each pointer move, call [`PanGesture::update`]; it returns the
//!    translation the viewport should take, measured from where the pan began.
//! 3) On pointer-up, call [`PanGesture::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use vitrine_view2d::{ClampMode, PanGesture, Viewport};
//!
//! let mut view = Viewport::new(Size::new(800.0, 600.0));
//! view.set_clamp_mode(ClampMode::None);
//! let mut pan = PanGesture::default();
//!
//! assert!(pan.begin(Point::new(10.0, 20.0), false, view.translation()));
//! let t = pan.update(Point::new(15.0, 25.0)).unwrap();
//! view.set_translation(t);
//! assert_eq!(view.translation(), Vec2::new(5.0, 5.0));
//! pan.end();
//! assert!(!pan.is_panning());
//! ```

use kurbo::{Point, Vec2};

/// Pan state: either idle or tracking a pointer from a start position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PanGesture {
    /// No pan in progress.
    #[default]
    Idle,
    /// A pan started at `start_pointer` while the viewport translation was
    /// `start_translation`.
    Panning {
        /// Pointer position at pointer-down.
        start_pointer: Point,
        /// Viewport translation at pointer-down.
        start_translation: Vec2,
    },
}

impl PanGesture {
    /// Starts panning unless the pointer is over an interactive item.
    ///
    /// Returns `true` when a pan began. A pan already in progress is replaced.
    pub fn begin(&mut self, pointer: Point, over_item: bool, translation: Vec2) -> bool {
        if over_item {
            return false;
        }
        *self = Self::Panning {
            start_pointer: pointer,
            start_translation: translation,
        };
        true
    }

    /// Returns the translation for the current pointer position, or `None`
    /// when idle.
    #[must_use]
    pub fn update(&self, pointer: Point) -> Option<Vec2> {
        match *self {
            Self::Idle => None,
            Self::Panning {
                start_pointer,
                start_translation,
            } => Some(start_translation + (pointer - start_pointer)),
        }
    }

    /// Ends the pan and returns to idle.
    pub fn end(&mut self) {
        *self = Self::Idle;
    }

    /// Returns `true` while a pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
