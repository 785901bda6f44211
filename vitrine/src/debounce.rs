// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalescing of container resizes.

use core::time::Duration;

use kurbo::Size;

/// Coalesces bursts of resize events into one re-fit.
///
/// Each [`ResizeDebounce::request`] pushes the deadline out by the interval;
/// [`ResizeDebounce::poll`] yields the latest size once the deadline passes.
/// A size equal to the last one yielded is dropped, so firing the same
/// resize several times re-fits at most once.
#[derive(Clone, Debug)]
pub struct ResizeDebounce {
    interval: Duration,
    pending: Option<(Size, Duration)>,
    applied: Option<Size>,
}

impl ResizeDebounce {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            applied: None,
        }
    }

    /// Records the size the container was last laid out for.
    pub fn mark_applied(&mut self, size: Size) {
        self.applied = Some(size);
    }

    /// Schedules a resize to `size`, observed at `now`.
    pub fn request(&mut self, size: Size, now: Duration) {
        self.pending = Some((size, now.saturating_add(self.interval)));
    }

    /// Returns `true` while a resize waits for its quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the size to re-fit to, if the quiet period has passed and the
    /// size actually changed.
    pub fn poll(&mut self, now: Duration) -> Option<Size> {
        let (size, deadline) = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;
        if self.applied == Some(size) {
            return None;
        }
        self.applied = Some(size);
        Some(size)
    }
}
