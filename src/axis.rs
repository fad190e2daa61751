//! Axis configuration, label styling, and text formatting.

use std::sync::Arc;

use chrono::DateTime;

use crate::render::{Color, Font};

/// Formatter for sample keys shown in tooltips.
#[derive(Clone, Default)]
pub enum KeyFormatter {
    /// Keys are Unix timestamps in milliseconds, shown as UTC date and time.
    #[default]
    Time,
    /// Keys are plain numbers.
    Number,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl KeyFormatter {
    /// Format a key for display.
    pub fn format(&self, key: f64) -> String {
        match self {
            Self::Time => format_time(key),
            Self::Number => format_value(key),
            Self::Custom(formatter) => formatter(key),
        }
    }
}

impl std::fmt::Debug for KeyFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time => write!(f, "KeyFormatter::Time"),
            Self::Number => write!(f, "KeyFormatter::Number"),
            Self::Custom(_) => write!(f, "KeyFormatter::Custom(..)"),
        }
    }
}

/// Format a millisecond timestamp as `YYYY-MM-DD HH:MM:SS.mmm` (UTC).
///
/// Timestamps outside the representable range fall back to the raw number.
pub fn format_time(ms: f64) -> String {
    if !ms.is_finite() {
        return format_value(ms);
    }
    match DateTime::from_timestamp_millis(ms.floor() as i64) {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => format_value(ms),
    }
}

/// Format a number with at most two decimals, trimming trailing zeros.
pub fn format_value(value: f64) -> String {
    let mut text = format!("{value:.2}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// Horizontal axis configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct XAxisConfig {
    /// Value units covered by one pixel in real-time mode.
    pub units_per_pixel: f64,
    /// Largest value on the axis in fixed-range mode.
    pub max: f64,
    /// Title drawn under the chart. Empty disables the title strip.
    pub label: String,
    /// Title font.
    pub font: Font,
    /// Title color.
    pub font_color: Color,
    /// Formatter used for keys in tooltips.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub formatter: KeyFormatter,
}

impl XAxisConfig {
    /// Set the real-time scale.
    pub fn with_units_per_pixel(mut self, units_per_pixel: f64) -> Self {
        self.units_per_pixel = units_per_pixel;
        self
    }

    /// Set the fixed-range maximum.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    /// Set the axis title.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the title font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set the key formatter.
    pub fn with_formatter(mut self, formatter: KeyFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Choose between timestamp and plain-number keys.
    pub fn with_time_keys(mut self, is_time: bool) -> Self {
        self.formatter = if is_time {
            KeyFormatter::Time
        } else {
            KeyFormatter::Number
        };
        self
    }

    /// Check whether keys are shown as timestamps.
    pub fn is_time(&self) -> bool {
        matches!(self.formatter, KeyFormatter::Time)
    }

    /// Height reserved under the axis for the title.
    pub fn label_strip_height(&self) -> f32 {
        if self.label.is_empty() {
            0.0
        } else {
            self.font.size + AXIS_LABEL_MARGIN
        }
    }
}

impl Default for XAxisConfig {
    fn default() -> Self {
        Self {
            units_per_pixel: 10.0,
            max: 110.0,
            label: String::new(),
            font: Font::default(),
            font_color: Color::BLACK,
            formatter: KeyFormatter::default(),
        }
    }
}

const AXIS_LABEL_MARGIN: f32 = 5.0;

/// Row label configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LabelConfig {
    /// Draw row labels and reserve the label column.
    pub enabled: bool,
    /// Label font.
    pub font: Font,
    /// Label color.
    pub font_color: Color,
}

impl LabelConfig {
    /// Hide row labels.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font: Font::default().bold(),
            font_color: Color::BLACK,
        }
    }
}

/// Text measurement used by layout.
pub trait TextMeasurer {
    /// Measure text, returning `(width, height)` in pixels.
    fn measure(&self, text: &str, font: &Font) -> (f32, f32);
}

/// Measurer that assumes every glyph has the same advance.
///
/// Useful for headless rendering and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font size.
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &Font) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let glyphs = text.chars().count() as f32;
        (glyphs * font.size * self.advance, font.size * 1.2)
    }
}
