// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Clamp behavior applied after panning and zooming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// Do not apply any clamping; the content may move freely.
    None,
    /// Run [`crate::Viewport::constrain_pan`] after every pan and zoom.
    ///
    /// Each axis is handled on its own: an axis where the scaled content is
    /// smaller than the container is centered, an axis where it overflows is
    /// clamped so the content edges never recede past the container edges.
    #[default]
    Contain,
}

/// How fitted content should be positioned inside the container.
///
/// This mode is consulted by [`crate::Viewport::fit_to_viewport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Center the fitted content within the container.
    #[default]
    Center,
    /// Align the minimum corner of the fitted content with the container origin.
    AlignMin,
}
