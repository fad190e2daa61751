//! Mapping from sample values to bar lengths in pixels.

use crate::axis::XAxisConfig;
use crate::view::View;

/// Horizontal scale for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum HorizontalScale {
    /// Value units per pixel.
    UnitsPerPixel(f64),
    /// Pixels per value unit.
    PixelsPerUnit(f64),
}

impl HorizontalScale {
    /// Build the scale for a view.
    ///
    /// Real-time views use the configured units-per-pixel ratio. Fixed-range
    /// views stretch `0..=max` across `drawable_width`, the surface width
    /// minus the label column.
    pub(crate) fn new(view: View, axis: &XAxisConfig, drawable_width: f32) -> Self {
        match view {
            View::RealTime => Self::UnitsPerPixel(axis.units_per_pixel),
            View::FixedRange => {
                if axis.max > 0.0 && drawable_width > 0.0 {
                    Self::PixelsPerUnit(f64::from(drawable_width) / axis.max)
                } else {
                    Self::PixelsPerUnit(0.0)
                }
            }
        }
    }

    /// Pixels per value unit.
    pub(crate) fn pixels_per_unit(&self) -> f64 {
        match *self {
            Self::UnitsPerPixel(units) if units > 0.0 => units.recip(),
            Self::UnitsPerPixel(_) => 0.0,
            Self::PixelsPerUnit(pixels) => pixels,
        }
    }

    /// Bar length in pixels for a value.
    pub(crate) fn length(&self, value: f64) -> f32 {
        let pixels = match *self {
            Self::UnitsPerPixel(units) if units > 0.0 => value / units,
            Self::UnitsPerPixel(_) => 0.0,
            Self::PixelsPerUnit(pixels) => value * pixels,
        };
        pixels as f32
    }
}
