//! Frame geometry: surface height, label column, and row bands.

use crate::axis::TextMeasurer;
use crate::config::ChartConfig;
use crate::series::Series;

/// Gap added to the widest label when sizing the label column.
pub(crate) const LABEL_COLUMN_MARGIN: f32 = 6.0;
/// Left inset of row labels.
pub(crate) const LABEL_INSET: f32 = 3.0;

/// Geometry shared by every drawing step of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Logical surface width.
    pub width: f32,
    /// Logical surface height.
    pub height: f32,
    /// Height reserved at the bottom for the axis title.
    pub label_strip: f32,
    /// Width of the label column; bars start at this x.
    pub label_column: f32,
    /// Height of one row band.
    pub band_height: f32,
    /// Padding between rows.
    pub padding: f32,
}

impl ChartLayout {
    /// Compute the layout for the enabled series.
    pub(crate) fn compute(
        series: &[Series],
        config: &ChartConfig,
        width: f32,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let padding = config.padding;
        let label_strip = config.x_axis.label_strip_height();
        let height = surface_height(series, padding, label_strip);
        let label_column = label_column_width(series, config, measurer);
        let band_height = if series.is_empty() {
            0.0
        } else {
            (height - label_strip) / series.len() as f32
        };
        Self {
            width,
            height,
            label_strip,
            label_column,
            band_height,
            padding,
        }
    }

    /// Y of the horizontal axis line.
    pub fn axis_y(&self) -> f32 {
        self.height - self.label_strip
    }

    /// Width left for bars.
    pub fn drawable_width(&self) -> f32 {
        (self.width - self.label_column).max(0.0)
    }

    /// Top edge of the bars for a series position.
    pub fn bar_top(&self, position: u32) -> f32 {
        (self.band_start(position) + self.padding / 2.0).round()
    }

    /// Vertical center of the band for a series position.
    pub fn band_center(&self, position: u32) -> f32 {
        (self.band_start(position) + self.band_height / 2.0).round()
    }

    fn band_start(&self, position: u32) -> f32 {
        self.band_height * position.saturating_sub(1) as f32
    }
}

/// Sum of enabled bar heights, row padding, and the title strip.
pub(crate) fn surface_height(series: &[Series], padding: f32, label_strip: f32) -> f32 {
    let enabled = series.iter().filter(|series| series.is_enabled());
    let (bars, count) = enabled.fold((0.0_f32, 0_usize), |(bars, count), series| {
        (bars + series.config().bar_height, count + 1)
    });
    bars + (count + 1) as f32 * padding + label_strip
}

/// Width of the widest enabled row label plus a margin.
pub(crate) fn label_column_width(
    series: &[Series],
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
) -> f32 {
    if !config.y_labels.enabled {
        return 0.0;
    }
    let widest = series
        .iter()
        .filter(|series| series.is_enabled())
        .map(|series| measurer.measure(&series.label(), &config.y_labels.font).0.ceil())
        .fold(0.0_f32, f32::max);
    widest + LABEL_COLUMN_MARGIN
}
