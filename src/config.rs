//! Chart-wide configuration.

use crate::axis::{LabelConfig, XAxisConfig};
use crate::render::{Color, Font};

/// Samples kept per series in real-time mode unless configured otherwise.
pub const DEFAULT_MAX_RETAINED_SAMPLES: usize = 50;

/// Tooltip configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TooltipConfig {
    /// Show tooltips while hovering bars.
    pub enabled: bool,
    /// Tooltip background.
    pub background_color: Color,
    /// Tooltip border color.
    pub border_color: Color,
    /// Tooltip text color.
    pub font_color: Color,
    /// Tooltip font.
    pub font: Font,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            background_color: Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xDD),
            border_color: Color::BLACK,
            font_color: Color::BLACK,
            font: Font::default(),
        }
    }
}

/// Configuration for a [`Chart`](crate::Chart).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChartConfig {
    /// Backing-store pixels per logical pixel.
    pub over_sample_factor: f32,
    /// Surface background; may be transparent.
    pub background_color: Color,
    /// Vertical padding between rows in pixels.
    pub padding: f32,
    /// Axis stroke width.
    pub axes_width: f32,
    /// Axis stroke color.
    pub axes_color: Color,
    /// Cap on samples kept per series in real-time mode. `None` keeps every
    /// sample that pixel eviction leaves behind.
    pub max_retained_samples: Option<usize>,
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
    /// Horizontal axis settings.
    pub x_axis: XAxisConfig,
    /// Row label settings.
    pub y_labels: LabelConfig,
}

impl ChartConfig {
    /// Set the oversample factor.
    pub fn with_over_sample_factor(mut self, factor: f32) -> Self {
        self.over_sample_factor = factor;
        self
    }

    /// Set the background color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the row padding.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the axis stroke.
    pub fn with_axes(mut self, color: Color, width: f32) -> Self {
        self.axes_color = color;
        self.axes_width = width;
        self
    }

    /// Cap the number of samples kept per series in real-time mode.
    pub fn with_max_retained_samples(mut self, max: usize) -> Self {
        self.max_retained_samples = Some(max);
        self
    }

    /// Remove the per-series sample cap.
    pub fn without_max_retained_samples(mut self) -> Self {
        self.max_retained_samples = None;
        self
    }

    /// Set the tooltip configuration.
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Set the horizontal axis configuration.
    pub fn with_x_axis(mut self, x_axis: XAxisConfig) -> Self {
        self.x_axis = x_axis;
        self
    }

    /// Set the row label configuration.
    pub fn with_y_labels(mut self, y_labels: LabelConfig) -> Self {
        self.y_labels = y_labels;
        self
    }

    /// Oversample factor clamped to a usable value.
    pub(crate) fn effective_over_sample(&self) -> f32 {
        if self.over_sample_factor.is_finite() && self.over_sample_factor > 0.0 {
            self.over_sample_factor
        } else {
            1.0
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            over_sample_factor: 3.0,
            background_color: Color::TRANSPARENT,
            padding: 5.0,
            axes_width: 2.0,
            axes_color: Color::BLACK,
            max_retained_samples: Some(DEFAULT_MAX_RETAINED_SAMPLES),
            tooltip: TooltipConfig::default(),
            x_axis: XAxisConfig::default(),
            y_labels: LabelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ChartConfig::default();
        assert_eq!(config.over_sample_factor, 3.0);
        assert_eq!(config.padding, 5.0);
        assert_eq!(config.axes_width, 2.0);
        assert_eq!(config.background_color, Color::TRANSPARENT);
        assert_eq!(config.tooltip.background_color.to_hex(), "#FFFFFFDD");
        assert_eq!(config.x_axis.units_per_pixel, 10.0);
        assert_eq!(config.x_axis.max, 110.0);
        assert!(config.y_labels.enabled);
        assert_eq!(config.max_retained_samples, Some(50));
        assert_eq!(config.without_max_retained_samples().max_retained_samples, None);
    }

    #[test]
    fn invalid_over_sample_falls_back_to_one() {
        let config = ChartConfig::default().with_over_sample_factor(0.0);
        assert_eq!(config.effective_over_sample(), 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let json = r##"{
            "padding": 8.0,
            "background_color": "#102030",
            "x_axis": { "units_per_pixel": 50.0, "label": "time" }
        }"##;
        let config: ChartConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.padding, 8.0);
        assert_eq!(config.background_color.to_hex(), "#102030FF");
        assert_eq!(config.x_axis.units_per_pixel, 50.0);
        assert_eq!(config.x_axis.max, 110.0);
        assert_eq!(config.over_sample_factor, 3.0);
        assert!(config.tooltip.enabled);
    }
}
