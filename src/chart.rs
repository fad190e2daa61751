//! Chart container, builder, and per-frame entry points.

use std::collections::HashSet;

use crate::axis::TextMeasurer;
use crate::config::ChartConfig;
use crate::error::ValidationError;
use crate::frame::{ChartFrame, build_frame};
use crate::geom::ScreenPoint;
use crate::interaction::{HitRegion, PointerState, Tooltip, hits_at, tooltip_lines};
use crate::layout::surface_height;
use crate::series::Series;
use crate::stream::{ChartStream, Surface};
use crate::view::View;

/// Horizontal stacked bar chart.
///
/// A chart owns its rows and the hover state derived from the most recent
/// frame. Frames are produced by [`Chart::render`], usually driven by a
/// [`ChartStream`].
#[derive(Debug, Clone)]
pub struct Chart {
    config: ChartConfig,
    view: View,
    series: Vec<Series>,
    pointer: PointerState,
    hits: Vec<HitRegion>,
}

impl Chart {
    /// Create an empty chart.
    pub fn new(config: ChartConfig, view: View) -> Self {
        Self {
            config,
            view,
            series: Vec::new(),
            pointer: PointerState::default(),
            hits: Vec::new(),
        }
    }

    /// Start building a chart with custom configuration.
    pub fn builder() -> ChartBuilder {
        ChartBuilder::default()
    }

    /// Access the chart configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Access the chart configuration mutably.
    pub fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    /// Access the view mode.
    pub fn view(&self) -> View {
        self.view
    }

    /// Switch the view mode.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Access all series in insertion order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Access all series mutably.
    pub fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    /// Find the series drawn at `position`.
    pub fn series_by_position_mut(&mut self, position: u32) -> Option<&mut Series> {
        self.series
            .iter_mut()
            .find(|series| series.position() == position)
    }

    /// Add a series to the chart.
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Check positions and per-series sample consistency.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for series in &self.series {
            if series.position() == 0 {
                return Err(ValidationError::ZeroPosition);
            }
            if !seen.insert(series.position()) {
                return Err(ValidationError::DuplicatePosition(series.position()));
            }
        }
        self.series.iter().try_for_each(Series::validate)
    }

    /// Validate the chart and start streaming frames to `surface`.
    ///
    /// The first frame is drawn before this returns. Nothing is drawn when
    /// validation fails.
    pub fn stream_to<S: Surface>(self, surface: S) -> Result<ChartStream<S>, ValidationError> {
        self.start()?;
        let mut stream = ChartStream::new(self, surface);
        stream.render_frame();
        Ok(stream)
    }

    /// Validate before the first frame, logging the outcome.
    pub(crate) fn start(&self) -> Result<(), ValidationError> {
        if let Err(err) = self.validate() {
            tracing::warn!(error = %err, "chart validation failed");
            return Err(err);
        }
        tracing::debug!(
            series = self.series.len(),
            view = ?self.view,
            "starting chart stream"
        );
        Ok(())
    }

    /// Build a frame for a surface `width` logical pixels wide.
    ///
    /// In real-time mode samples that scrolled out of view are evicted once
    /// the frame is laid out.
    pub fn render(&mut self, width: f32, measurer: &dyn TextMeasurer) -> ChartFrame {
        let frame = build_frame(
            &self.series,
            &self.config,
            self.view,
            self.pointer.tooltip.as_ref(),
            width,
            measurer,
        );
        if self.view.is_real_time() {
            let retained_width = frame.layout.drawable_width();
            for series in &mut self.series {
                if series.len() > 1 {
                    series.evict(&frame.spans, retained_width);
                }
                if let Some(max) = self.config.max_retained_samples {
                    series.retain_last(max);
                }
            }
        }
        self.hits.clone_from(&frame.hits);
        frame
    }

    /// Update hover state and the tooltip for a pointer at `point`.
    pub fn pointer_moved(&mut self, point: ScreenPoint) {
        self.pointer.hovering = true;
        self.pointer.last = Some(point);
        if !self.config.tooltip.enabled {
            self.pointer.tooltip = None;
            return;
        }
        let hits = hits_at(&self.hits, point, self.config.effective_over_sample());
        let lines = tooltip_lines(&self.series, hits, &self.config.x_axis.formatter);
        if lines.is_empty() {
            self.pointer.tooltip = None;
        } else {
            tracing::trace!(x = point.x, y = point.y, lines = lines.len(), "tooltip updated");
            self.pointer.tooltip = Some(Tooltip {
                position: point,
                lines,
            });
        }
    }

    /// Clear hover state when the pointer leaves the surface.
    pub fn pointer_left(&mut self) {
        self.pointer.clear();
    }

    /// Bars under a click at `point`.
    ///
    /// Clicking has no built-in effect; hosts decide what to do with the hits.
    pub fn pointer_clicked(&self, point: ScreenPoint) -> Vec<HitRegion> {
        hits_at(&self.hits, point, self.config.effective_over_sample())
            .copied()
            .collect()
    }

    /// Visible tooltip, if any.
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.pointer.tooltip.as_ref()
    }

    /// Check whether the pointer is over the surface.
    pub fn is_hovering(&self) -> bool {
        self.pointer.hovering
    }

    /// Last pointer position seen while hovering.
    pub fn last_pointer(&self) -> Option<ScreenPoint> {
        self.pointer.last
    }

    /// Logical height the next frame will need.
    pub fn surface_height(&self) -> f32 {
        surface_height(
            &self.series,
            self.config.padding,
            self.config.x_axis.label_strip_height(),
        )
    }

    /// Hit regions of the most recent frame.
    pub fn hit_regions(&self) -> &[HitRegion] {
        &self.hits
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(ChartConfig::default(), View::default())
    }
}

/// Builder for configuring a chart before construction.
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: ChartConfig,
    view: View,
    series: Vec<Series>,
}

impl ChartBuilder {
    /// Set the chart configuration.
    pub fn config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the view mode.
    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Add a series to the chart.
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Build the chart.
    pub fn build(self) -> Chart {
        Chart {
            config: self.config,
            view: self.view,
            series: self.series,
            pointer: PointerState::default(),
            hits: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{LabelConfig, MonospaceMeasurer, XAxisConfig};
    use crate::config::TooltipConfig;
    use crate::datasource::Sample;
    use crate::render::Color;

    fn real_time_chart(series: Series) -> Chart {
        Chart::builder()
            .config(
                ChartConfig::default()
                    .with_over_sample_factor(1.0)
                    .with_y_labels(LabelConfig::disabled())
                    .with_x_axis(XAxisConfig::default().with_time_keys(false)),
            )
            .view(View::RealTime)
            .series(series)
            .build()
    }

    fn keys(chart: &Chart) -> Vec<f64> {
        chart.series()[0]
            .samples()
            .iter()
            .filter_map(Sample::key)
            .collect()
    }

    #[test]
    fn zero_and_duplicate_positions_are_rejected() {
        let chart = Chart::builder().series(Series::new(0)).build();
        assert_eq!(chart.validate(), Err(ValidationError::ZeroPosition));

        let chart = Chart::builder()
            .series(Series::new(2))
            .series(Series::new(2))
            .build();
        assert_eq!(chart.validate(), Err(ValidationError::DuplicatePosition(2)));
    }

    #[test]
    fn mixed_values_fail_validation() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 1.0, Color::RED));
        series.append(Sample::new(Color::RED).with_key(1.0));
        let chart = Chart::builder().series(series).build();
        assert_eq!(
            chart.validate(),
            Err(ValidationError::MixedValuePresence {
                position: 1,
                index: 1
            })
        );
    }

    #[test]
    fn real_time_render_evicts_scrolled_samples() {
        let mut series = Series::new(1);
        for key in 0..5 {
            series.append(Sample::keyed(f64::from(key), 300.0, Color::RED));
        }
        let mut chart = real_time_chart(series);
        chart.render(100.0, &MonospaceMeasurer::default());
        assert_eq!(keys(&chart), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn fixed_range_render_keeps_everything() {
        let mut series = Series::new(1);
        for key in 0..5 {
            series.append(Sample::keyed(f64::from(key), 300.0, Color::RED));
        }
        let mut chart = real_time_chart(series);
        chart.set_view(View::FixedRange);
        chart.render(100.0, &MonospaceMeasurer::default());
        assert_eq!(chart.series()[0].len(), 5);
    }

    #[test]
    fn single_sample_is_never_evicted() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 5_000.0, Color::RED));
        let mut chart = real_time_chart(series);
        chart.render(100.0, &MonospaceMeasurer::default());
        assert_eq!(chart.series()[0].len(), 1);
    }

    #[test]
    fn retained_sample_cap_applies_after_eviction() {
        let mut series = Series::new(1);
        for key in 0..6 {
            series.append(Sample::keyed(f64::from(key), 10.0, Color::RED));
        }
        let mut chart = real_time_chart(series);
        chart.config_mut().max_retained_samples = Some(2);
        chart.render(400.0, &MonospaceMeasurer::default());
        assert_eq!(keys(&chart), vec![4.0, 5.0]);
    }

    #[test]
    fn markers_and_zero_values_are_capped_by_default() {
        let mut markers = Series::new(1);
        let mut zeros = Series::new(2);
        for key in 0..1_000 {
            markers.append(Sample::new(Color::RED).with_key(f64::from(key)));
            zeros.append(Sample::keyed(f64::from(key), 0.0, Color::RED));
        }
        let mut chart = Chart::builder()
            .config(ChartConfig::default().with_y_labels(LabelConfig::disabled()))
            .view(View::RealTime)
            .series(markers)
            .series(zeros)
            .build();
        assert_eq!(chart.validate(), Ok(()));
        for _ in 0..10 {
            chart.render(200.0, &MonospaceMeasurer::default());
        }
        assert_eq!(chart.series()[0].len(), 50);
        assert_eq!(chart.series()[1].len(), 50);
        assert_eq!(chart.series()[0].samples()[0].key(), Some(950.0));
    }

    #[test]
    fn full_row_keeps_newest_bar_past_the_edge() {
        let mut series = Series::new(1);
        for key in 0..30 {
            series.append(Sample::keyed(f64::from(key), 100.0, Color::RED));
        }
        let mut chart = real_time_chart(series);
        chart.render(100.0, &MonospaceMeasurer::default());
        assert_eq!(chart.series()[0].len(), 11);

        let frame = chart.render(100.0, &MonospaceMeasurer::default());
        assert_eq!(chart.series()[0].len(), 11);
        let newest = chart.series()[0].samples()[10].id();
        let span = frame.spans[&newest];
        assert_eq!(span.end, 110.0);
        assert!(!span.drawn);
        assert_eq!(frame.hits.len(), 10);
    }

    #[test]
    fn uncapped_chart_keeps_unmeasured_samples() {
        let mut markers = Series::new(1);
        for key in 0..100 {
            markers.append(Sample::new(Color::RED).with_key(f64::from(key)));
        }
        let mut chart = real_time_chart(markers);
        chart.config_mut().max_retained_samples = None;
        chart.render(200.0, &MonospaceMeasurer::default());
        assert_eq!(chart.series()[0].len(), 100);
    }

    #[test]
    fn hovering_a_bar_shows_its_tooltip() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(7.0, 100.0, Color::RED).with_description("busy"));
        let mut chart = real_time_chart(series);
        chart.render(400.0, &MonospaceMeasurer::default());

        chart.pointer_moved(ScreenPoint::new(5.0, 10.0));
        let tooltip = chart.tooltip().expect("tooltip");
        assert_eq!(tooltip.lines, vec!["busy", "X: 7", "Value: 100"]);
        assert_eq!(tooltip.position, ScreenPoint::new(5.0, 10.0));
        assert!(chart.is_hovering());

        chart.pointer_moved(ScreenPoint::new(300.0, 10.0));
        assert!(chart.tooltip().is_none());
        assert_eq!(chart.last_pointer(), Some(ScreenPoint::new(300.0, 10.0)));
    }

    #[test]
    fn leaving_clears_hover() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(7.0, 100.0, Color::RED));
        let mut chart = real_time_chart(series);
        chart.render(400.0, &MonospaceMeasurer::default());
        chart.pointer_moved(ScreenPoint::new(5.0, 10.0));
        chart.pointer_left();
        assert!(chart.tooltip().is_none());
        assert!(!chart.is_hovering());
    }

    #[test]
    fn disabled_tooltips_stay_hidden() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(7.0, 100.0, Color::RED));
        let mut chart = real_time_chart(series);
        chart.config_mut().tooltip = TooltipConfig {
            enabled: false,
            ..TooltipConfig::default()
        };
        chart.render(400.0, &MonospaceMeasurer::default());
        chart.pointer_moved(ScreenPoint::new(5.0, 10.0));
        assert!(chart.tooltip().is_none());
    }

    #[test]
    fn clicks_report_hits_without_side_effects() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(7.0, 100.0, Color::RED));
        let mut chart = real_time_chart(series);
        chart.render(400.0, &MonospaceMeasurer::default());
        assert_eq!(chart.pointer_clicked(ScreenPoint::new(5.0, 10.0)).len(), 1);
        assert!(chart.pointer_clicked(ScreenPoint::new(200.0, 10.0)).is_empty());
        assert!(chart.tooltip().is_none());
    }

    #[test]
    fn surface_height_matches_rendered_frame() {
        let mut chart = Chart::builder()
            .series(Series::new(1).with_bar_height(30.0))
            .series(Series::new(2))
            .config(ChartConfig::default().with_x_axis(XAxisConfig::default().with_label("t")))
            .build();
        let frame = chart.render(300.0, &MonospaceMeasurer::default());
        assert_eq!(chart.surface_height(), frame.size.height);
        assert_eq!(chart.surface_height(), 30.0 + 22.0 + 15.0 + 17.0);
    }

    #[test]
    fn tooltip_is_painted_on_the_next_frame() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(7.0, 100.0, Color::RED));
        let mut chart = real_time_chart(series);
        let before = chart.render(400.0, &MonospaceMeasurer::default()).render.len();
        chart.pointer_moved(ScreenPoint::new(5.0, 10.0));
        let after = chart.render(400.0, &MonospaceMeasurer::default()).render.len();
        assert_eq!(after, before + 3);
    }
}
