// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explorer configuration.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vitrine_flip::{Easing, Thresholds, TransitionOptions};
use vitrine_layout::{GridParams, GroupedParams, RowParams};

/// Errors produced while loading an [`ExplorerConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration is not valid JSON or has unknown shapes.
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A value that must be positive is zero, negative, or not finite.
    #[error("`{field}` must be a positive number, got {value}")]
    NotPositive {
        /// Dotted path of the field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A value that must be non-negative is negative or not finite.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Dotted path of the field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A `min`/`max` pair is inverted.
    #[error("`{field}` range is inverted: {min} > {max}")]
    InvertedRange {
        /// Dotted path of the pair.
        field: &'static str,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },
    /// The zoom step would not zoom.
    #[error("`viewport.zoom_step` must be greater than 1, got {0}")]
    ZoomStep(f64),
}

/// Grid layout settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Smallest admissible cell edge.
    pub min_cell: f64,
    /// Largest admissible cell edge.
    pub max_cell: f64,
    /// Spacing between cells.
    pub gap: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        let params = GridParams::default();
        Self {
            min_cell: params.min_cell,
            max_cell: params.max_cell,
            gap: params.gap,
        }
    }
}

/// Deep-zoom row layout settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepZoomConfig {
    /// Height every item is normalized to, in content units.
    pub row_height: f64,
    /// Spacing between items.
    pub gap: f64,
    /// Bias toward wide arrangements.
    pub widen_factor: f64,
}

impl Default for DeepZoomConfig {
    fn default() -> Self {
        Self {
            row_height: 100.0,
            gap: 5.0,
            widen_factor: 2.0,
        }
    }
}

/// Grouped layout settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupedConfig {
    /// Fixed cell edge inside each stack.
    pub cell_size: f64,
    /// Spacing between cells.
    pub gap: f64,
    /// Padding inside each group slot.
    pub padding: f64,
    /// Distance from the baseline to the label row.
    pub label_margin: f64,
    /// Height reserved for labels.
    pub label_height: f64,
}

impl Default for GroupedConfig {
    fn default() -> Self {
        let params = GroupedParams::default();
        Self {
            cell_size: params.cell_size,
            gap: params.gap,
            padding: params.padding,
            label_margin: params.label_margin,
            label_height: params.label_height,
        }
    }
}

/// Viewport settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Smallest zoom.
    pub min_scale: f64,
    /// Largest zoom.
    pub max_scale: f64,
    /// Upper bound on the scale chosen by fitting.
    pub max_fit_scale: f64,
    /// Factor applied by zoom in/out.
    pub zoom_step: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 10.0,
            max_fit_scale: 1.0,
            zoom_step: vitrine_view2d::DEFAULT_ZOOM_STEP,
        }
    }
}

/// Named timing functions, as written in configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingConfig {
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
    /// Custom control points `[x1, y1, x2, y2]`.
    CubicBezier([f64; 4]),
}

impl From<EasingConfig> for Easing {
    fn from(config: EasingConfig) -> Self {
        match config {
            EasingConfig::Linear => Self::Linear,
            EasingConfig::Ease => Self::Ease,
            EasingConfig::EaseIn => Self::EaseIn,
            EasingConfig::EaseOut => Self::EaseOut,
            EasingConfig::EaseInOut => Self::EaseInOut,
            EasingConfig::CubicBezier([x1, y1, x2, y2]) => Self::CubicBezier(x1, y1, x2, y2),
        }
    }
}

/// Transition settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Duration of each animation, in milliseconds.
    pub duration_ms: u64,
    /// Timing function.
    pub easing: EasingConfig,
    /// Translation below this many pixels is not animated.
    pub translate_threshold: f64,
    /// Relative scale change below this is not animated.
    pub scale_threshold: f64,
    /// Opacity change below this is not animated.
    pub opacity_threshold: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            duration_ms: 400,
            easing: EasingConfig::default(),
            translate_threshold: thresholds.translate,
            scale_threshold: thresholds.scale,
            opacity_threshold: thresholds.opacity,
        }
    }
}

/// Everything an [`Explorer`](crate::Explorer) can be tuned with.
///
/// Every field has a default, so `{}` is a valid configuration:
///
/// ```rust
/// use vitrine::ExplorerConfig;
///
/// let config = ExplorerConfig::from_json_str(r#"{"grid": {"max_cell": 120}}"#).unwrap();
/// assert_eq!(config.grid.max_cell, 120.0);
/// assert_eq!(config.grid.min_cell, 30.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Uniform grid.
    pub grid: GridConfig,
    /// Deep-zoom rows.
    pub deep_zoom: DeepZoomConfig,
    /// Grouped stacks.
    pub grouped: GroupedConfig,
    /// Pan and zoom.
    pub viewport: ViewportConfig,
    /// Animations.
    pub transition: TransitionConfig,
    /// Quiet period before a resize re-fits, in milliseconds.
    pub resize_debounce_ms: u64,
    /// Width of the detail panel, in screen pixels.
    pub detail_panel_width: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            deep_zoom: DeepZoomConfig::default(),
            grouped: GroupedConfig::default(),
            viewport: ViewportConfig::default(),
            transition: TransitionConfig::default(),
            resize_debounce_ms: 150,
            detail_panel_width: 360.0,
        }
    }
}

impl ExplorerConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and signs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("grid.min_cell", self.grid.min_cell)?;
        positive("grid.max_cell", self.grid.max_cell)?;
        ordered("grid", self.grid.min_cell, self.grid.max_cell)?;
        non_negative("grid.gap", self.grid.gap)?;

        positive("deep_zoom.row_height", self.deep_zoom.row_height)?;
        positive("deep_zoom.widen_factor", self.deep_zoom.widen_factor)?;
        non_negative("deep_zoom.gap", self.deep_zoom.gap)?;

        positive("grouped.cell_size", self.grouped.cell_size)?;
        non_negative("grouped.gap", self.grouped.gap)?;
        non_negative("grouped.padding", self.grouped.padding)?;
        non_negative("grouped.label_margin", self.grouped.label_margin)?;
        non_negative("grouped.label_height", self.grouped.label_height)?;

        positive("viewport.min_scale", self.viewport.min_scale)?;
        positive("viewport.max_scale", self.viewport.max_scale)?;
        ordered("viewport.scale", self.viewport.min_scale, self.viewport.max_scale)?;
        positive("viewport.max_fit_scale", self.viewport.max_fit_scale)?;
        if !(self.viewport.zoom_step.is_finite() && self.viewport.zoom_step > 1.0) {
            return Err(ConfigError::ZoomStep(self.viewport.zoom_step));
        }

        non_negative("transition.translate_threshold", self.transition.translate_threshold)?;
        non_negative("transition.scale_threshold", self.transition.scale_threshold)?;
        non_negative("transition.opacity_threshold", self.transition.opacity_threshold)?;

        non_negative("detail_panel_width", self.detail_panel_width)
    }

    /// Parameters for the uniform grid.
    #[must_use]
    pub fn grid_params(&self) -> GridParams {
        GridParams::new(self.grid.min_cell, self.grid.max_cell).with_gap(self.grid.gap)
    }

    /// Parameters for the deep-zoom rows.
    #[must_use]
    pub fn row_params(&self) -> RowParams {
        RowParams {
            row_height: self.deep_zoom.row_height,
            gap: self.deep_zoom.gap,
            widen_factor: self.deep_zoom.widen_factor,
        }
    }

    /// Parameters for the grouped stacks.
    #[must_use]
    pub fn grouped_params(&self) -> GroupedParams {
        GroupedParams {
            cell_size: self.grouped.cell_size,
            gap: self.grouped.gap,
            padding: self.grouped.padding,
            label_margin: self.grouped.label_margin,
            label_height: self.grouped.label_height,
        }
    }

    /// FLIP skip thresholds.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            translate: self.transition.translate_threshold,
            scale: self.transition.scale_threshold,
            opacity: self.transition.opacity_threshold,
        }
    }

    /// Fresh options for one engine call.
    #[must_use]
    pub fn transition_options(&self) -> TransitionOptions {
        TransitionOptions::new(Duration::from_millis(self.transition.duration_ms))
            .with_easing(self.transition.easing.into())
    }

    /// The resize quiet period.
    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
