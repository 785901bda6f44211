// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing functions.

/// Maps linear progress in `[0, 1]` to eased progress.
///
/// The named curves use the CSS control points, so transitions match what a
/// browser host would play for the same keyword.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// CSS `ease`.
    #[default]
    Ease,
    /// CSS `ease-in`.
    EaseIn,
    /// CSS `ease-out`.
    EaseOut,
    /// CSS `ease-in-out`.
    EaseInOut,
    /// A CSS `cubic-bezier(x1, y1, x2, y2)` curve. `x1` and `x2` are clamped
    /// into `[0, 1]` so the curve stays a function of time.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Eased progress for linear progress `t`, which is clamped into `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (x1, y1, x2, y2) = match self {
            Self::Linear => return t,
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => (x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2),
        };
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = solve_parameter(t, x1, x2);
        bezier(s, y1, y2)
    }
}

/// One coordinate of a cubic Bézier with endpoints 0 and 1.
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Finds the curve parameter whose x coordinate is `x`.
///
/// Newton's method converges in a few steps for typical curves; bisection
/// takes over when the slope is too flat.
fn solve_parameter(x: f64, x1: f64, x2: f64) -> f64 {
    const EPS: f64 = 1e-7;
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < EPS {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = x;
    for _ in 0..64 {
        let v = bezier(s, x1, x2);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}
