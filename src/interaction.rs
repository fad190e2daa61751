//! Pointer interaction: hit testing and tooltip content.

use crate::axis::{KeyFormatter, format_value};
use crate::datasource::SampleId;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::series::{Series, SeriesId};

/// Screen area covered by a drawn bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    /// Series that owns the bar.
    pub series_id: SeriesId,
    /// Sample drawn as the bar.
    pub sample_id: SampleId,
    /// Bar bounds in logical pixels.
    pub rect: ScreenRect,
}

impl HitRegion {
    /// Test containment in backing-store pixels.
    ///
    /// Both the region and the logical pointer are scaled by the oversample
    /// factor before the test.
    pub fn contains(&self, pointer: ScreenPoint, over_sample: f32) -> bool {
        self.rect
            .scaled(over_sample)
            .contains(pointer.scaled(over_sample))
    }
}

/// Tooltip overlay content.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Top-left corner, at the pointer.
    pub position: ScreenPoint,
    /// Text lines, top to bottom.
    pub lines: Vec<String>,
}

/// Hover state owned by the chart.
#[derive(Debug, Clone, Default)]
pub(crate) struct PointerState {
    pub(crate) hovering: bool,
    pub(crate) last: Option<ScreenPoint>,
    pub(crate) tooltip: Option<Tooltip>,
}

impl PointerState {
    pub(crate) fn clear(&mut self) {
        self.hovering = false;
        self.tooltip = None;
    }
}

/// Regions under the pointer, in paint order.
pub(crate) fn hits_at(
    regions: &[HitRegion],
    pointer: ScreenPoint,
    over_sample: f32,
) -> impl Iterator<Item = &HitRegion> {
    regions
        .iter()
        .filter(move |region| region.contains(pointer, over_sample))
}

/// Tooltip lines for every sample under the pointer.
///
/// Each match contributes its description (when present), its key, and its
/// value. Regions whose sample has since been evicted are skipped.
pub(crate) fn tooltip_lines<'a>(
    series: &[Series],
    hits: impl IntoIterator<Item = &'a HitRegion>,
    formatter: &KeyFormatter,
) -> Vec<String> {
    let mut lines = Vec::new();
    for hit in hits {
        let Some(sample) = series
            .iter()
            .find(|series| series.id() == hit.series_id)
            .and_then(|series| series.sample(hit.sample_id))
        else {
            continue;
        };
        if !sample.description().is_empty() {
            lines.push(sample.description().to_string());
        }
        let key = sample
            .key()
            .map_or_else(|| "-".to_string(), |key| formatter.format(key));
        lines.push(format!("X: {key}"));
        let value = sample.value().map_or_else(|| "-".to_string(), format_value);
        lines.push(format!("Value: {value}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::Sample;
    use crate::render::Color;

    fn region(series: &Series, index: usize, x0: f32, x1: f32) -> HitRegion {
        HitRegion {
            series_id: series.id(),
            sample_id: series.samples()[index].id(),
            rect: ScreenRect::new(ScreenPoint::new(x0, 0.0), ScreenPoint::new(x1, 10.0)),
        }
    }

    #[test]
    fn hits_respect_over_sample_scaling() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 1.0, Color::RED));
        let regions = [region(&series, 0, 10.0, 20.0)];
        assert_eq!(hits_at(&regions, ScreenPoint::new(15.0, 5.0), 3.0).count(), 1);
        assert_eq!(hits_at(&regions, ScreenPoint::new(25.0, 5.0), 3.0).count(), 0);
    }

    #[test]
    fn overlapping_regions_all_match() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 1.0, Color::RED));
        series.append(Sample::keyed(1.0, 2.0, Color::RED));
        let regions = [region(&series, 0, 0.0, 10.0), region(&series, 1, 10.0, 20.0)];
        assert_eq!(hits_at(&regions, ScreenPoint::new(10.0, 5.0), 1.0).count(), 2);
    }

    #[test]
    fn lines_include_description_key_and_value() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(4.0, 2.5, Color::RED).with_description("idle"));
        series.append(Sample::keyed(5.0, 3.0, Color::RED));
        let regions = [region(&series, 0, 0.0, 10.0), region(&series, 1, 10.0, 20.0)];
        let lines = tooltip_lines(&[series], &regions, &KeyFormatter::Number);
        assert_eq!(
            lines,
            vec!["idle", "X: 4", "Value: 2.5", "X: 5", "Value: 3"]
        );
    }

    #[test]
    fn evicted_samples_are_skipped() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(4.0, 2.5, Color::RED));
        let regions = [region(&series, 0, 0.0, 10.0)];
        series.clear();
        assert!(tooltip_lines(&[series], &regions, &KeyFormatter::Number).is_empty());
    }

    #[test]
    fn unkeyed_samples_show_placeholder() {
        let mut series = Series::new(1);
        series.append(Sample::new(Color::RED).with_value(1.0));
        let regions = [region(&series, 0, 0.0, 10.0)];
        let lines = tooltip_lines(&[series], &regions, &KeyFormatter::Time);
        assert_eq!(lines, vec!["X: -", "Value: 1"]);
    }
}
