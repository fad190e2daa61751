//! Per-frame layout and render-list construction.

use std::collections::HashMap;

use crate::axis::{TextMeasurer, format_value};
use crate::config::ChartConfig;
use crate::datasource::SampleId;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{HitRegion, Tooltip};
use crate::layout::{ChartLayout, LABEL_INSET};
use crate::render::{
    Color, Font, FrameSize, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
};
use crate::series::Series;
use crate::transform::HorizontalScale;
use crate::view::View;

/// Space between the bar edges and the value text.
const VALUE_TEXT_MARGIN: f32 = 4.0;
const VALUE_FONT_FAMILY: &str = "monospace";
const TOOLTIP_PADDING: f32 = 4.0;
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Horizontal extent of a laid-out bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    /// Left edge in logical pixels.
    pub start: f32,
    /// Right edge in logical pixels.
    pub end: f32,
    /// Whether the bar fit on the surface and was drawn.
    pub drawn: bool,
}

impl BarSpan {
    /// Create a span.
    pub fn new(start: f32, end: f32, drawn: bool) -> Self {
        Self { start, end, drawn }
    }

    /// Span length in pixels.
    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    /// Check whether the span has zero length.
    pub fn is_empty(&self) -> bool {
        self.len() == 0.0
    }
}

/// Everything produced by one render pass.
///
/// Spans and hit regions form a side table keyed by sample identity; the
/// samples themselves are never written to.
#[derive(Debug, Clone)]
pub struct ChartFrame {
    /// Surface size for this frame.
    pub size: FrameSize,
    /// Geometry used while drawing.
    pub layout: ChartLayout,
    /// Drawing commands, in paint order.
    pub render: RenderList,
    /// Laid-out spans of every sample with a value.
    pub spans: HashMap<SampleId, BarSpan>,
    /// Hit regions of drawn bars, in paint order.
    pub hits: Vec<HitRegion>,
}

pub(crate) fn build_frame(
    series: &[Series],
    config: &ChartConfig,
    view: View,
    tooltip: Option<&Tooltip>,
    width: f32,
    measurer: &dyn TextMeasurer,
) -> ChartFrame {
    let layout = ChartLayout::compute(series, config, width, measurer);
    let size = FrameSize {
        width,
        height: layout.height,
        over_sample: config.effective_over_sample(),
    };
    let scale = HorizontalScale::new(view, &config.x_axis, layout.drawable_width());
    tracing::trace!(
        width,
        height = layout.height,
        label_column = layout.label_column,
        pixels_per_unit = scale.pixels_per_unit(),
        "building frame"
    );

    let mut frame = ChartFrame {
        size,
        layout,
        render: RenderList::new(),
        spans: HashMap::new(),
        hits: Vec::new(),
    };
    frame.render.push(RenderCommand::Clear(config.background_color));
    build_axes(&mut frame.render, &layout, config);
    build_axis_title(&mut frame.render, &layout, config, measurer);
    for series in series.iter().filter(|series| series.is_enabled()) {
        build_label(&mut frame.render, &layout, config, series);
        build_bars(&mut frame, &layout, &scale, series, measurer);
    }
    if let Some(tooltip) = tooltip {
        build_tooltip(&mut frame.render, tooltip, config, measurer);
    }
    frame
}

fn build_axes(render: &mut RenderList, layout: &ChartLayout, config: &ChartConfig) {
    let bottom = layout.axis_y();
    render.push(RenderCommand::Polyline {
        points: vec![
            ScreenPoint::new(layout.width, bottom),
            ScreenPoint::new(layout.label_column, bottom),
            ScreenPoint::new(layout.label_column, 0.0),
        ],
        style: LineStyle {
            color: config.axes_color,
            width: config.axes_width,
        },
    });
}

fn build_axis_title(
    render: &mut RenderList,
    layout: &ChartLayout,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
) {
    let axis = &config.x_axis;
    if axis.label.is_empty() {
        return;
    }
    let (text_width, _) = measurer.measure(&axis.label, &axis.font);
    let position = ScreenPoint::new(
        layout.width / 2.0 - text_width.ceil() / 2.0,
        layout.axis_y() + (layout.label_strip - axis.font.size) / 2.0,
    );
    render.push(RenderCommand::Text {
        position,
        text: axis.label.clone(),
        style: TextStyle {
            color: axis.font_color,
            font: axis.font.clone(),
            outline: None,
        },
    });
}

fn build_label(render: &mut RenderList, layout: &ChartLayout, config: &ChartConfig, series: &Series) {
    let labels = &config.y_labels;
    if !labels.enabled {
        return;
    }
    let center = layout.band_center(series.position());
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(LABEL_INSET, center - labels.font.size / 2.0),
        text: series.label(),
        style: TextStyle {
            color: labels.font_color,
            font: labels.font.clone(),
            outline: None,
        },
    });
}

/// Lay out a series' bars end to end, starting at the label column.
///
/// Samples without a value take no room. Bars ending past the surface edge are
/// recorded in the span table but not drawn.
fn build_bars(
    frame: &mut ChartFrame,
    layout: &ChartLayout,
    scale: &HorizontalScale,
    series: &Series,
    measurer: &dyn TextMeasurer,
) {
    let bar_height = series.config().bar_height;
    let top = layout.bar_top(series.position());
    let mut last_end = layout.label_column;

    for sample in series.samples() {
        let Some(value) = sample.value() else {
            continue;
        };
        let start = last_end;
        let end = start + scale.length(value);
        last_end = end;

        let drawn = end <= layout.width;
        frame.spans.insert(sample.id(), BarSpan::new(start, end, drawn));
        if !drawn {
            continue;
        }

        let rect = ScreenRect::new(
            ScreenPoint::new(start, top),
            ScreenPoint::new(end, top + bar_height),
        );
        frame.render.push(RenderCommand::Rect {
            rect,
            style: RectStyle::filled(sample.color()),
        });
        frame.hits.push(HitRegion {
            series_id: series.id(),
            sample_id: sample.id(),
            rect,
        });

        if series.config().show_values {
            build_value_text(&mut frame.render, rect, value, measurer);
        }
    }
}

/// Value text centered in the bar, drawn only when it fits.
fn build_value_text(
    render: &mut RenderList,
    bar: ScreenRect,
    value: f64,
    measurer: &dyn TextMeasurer,
) {
    let font_size = bar.height() - VALUE_TEXT_MARGIN;
    if font_size <= 0.0 {
        return;
    }
    let text = format_value(value);
    let font = Font::new(VALUE_FONT_FAMILY, font_size).bold();
    let (text_width, _) = measurer.measure(&text, &font);
    let text_width = text_width.ceil();
    if text_width >= bar.width() {
        return;
    }
    let position = ScreenPoint::new(
        (bar.min.x + (bar.width() - text_width) / 2.0).round(),
        bar.min.y + (bar.height() - font_size) / 2.0,
    );
    render.push(RenderCommand::Text {
        position,
        text,
        style: TextStyle {
            color: Color::WHITE,
            font,
            outline: Some(LineStyle {
                color: Color::BLACK,
                width: 1.0,
            }),
        },
    });
}

fn build_tooltip(
    render: &mut RenderList,
    tooltip: &Tooltip,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
) {
    let style = &config.tooltip;
    let line_height = style.font.size * LINE_HEIGHT_FACTOR;
    let text_width = tooltip
        .lines
        .iter()
        .map(|line| measurer.measure(line, &style.font).0)
        .fold(0.0_f32, f32::max);
    let rect = ScreenRect::from_origin_size(
        tooltip.position,
        text_width + TOOLTIP_PADDING * 2.0,
        line_height * tooltip.lines.len() as f32 + TOOLTIP_PADDING * 2.0,
    );
    render.push(RenderCommand::Rect {
        rect,
        style: RectStyle {
            fill: style.background_color,
            stroke: Some(LineStyle {
                color: style.border_color,
                width: 1.0,
            }),
        },
    });
    for (index, line) in tooltip.lines.iter().enumerate() {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                rect.min.x + TOOLTIP_PADDING,
                rect.min.y + TOOLTIP_PADDING + line_height * index as f32,
            ),
            text: line.clone(),
            style: TextStyle {
                color: style.font_color,
                font: style.font.clone(),
                outline: None,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{LabelConfig, MonospaceMeasurer, XAxisConfig};
    use crate::datasource::Sample;

    fn real_time_config() -> ChartConfig {
        ChartConfig::default()
            .with_over_sample_factor(1.0)
            .with_y_labels(LabelConfig::disabled())
            .with_x_axis(XAxisConfig::default().with_units_per_pixel(10.0))
    }

    fn spans_of(frame: &ChartFrame, series: &Series) -> Vec<Option<(f32, f32)>> {
        series
            .samples()
            .iter()
            .map(|sample| frame.spans.get(&sample.id()).map(|span| (span.start, span.end)))
            .collect()
    }

    fn texts(frame: &ChartFrame) -> Vec<&str> {
        frame
            .render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn real_time_bars_are_contiguous() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 10.0, Color::RED));
        series.append(Sample::keyed(1.0, 20.0, Color::RED));
        let series = vec![series];
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            None,
            400.0,
            &MonospaceMeasurer::default(),
        );
        assert_eq!(frame.layout.label_column, 0.0);
        assert_eq!(
            spans_of(&frame, &series[0]),
            vec![Some((0.0, 1.0)), Some((1.0, 3.0))]
        );
        assert_eq!(frame.hits.len(), 2);
    }

    #[test]
    fn key_gaps_do_not_move_bars() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 100.0, Color::RED));
        series.append(Sample::keyed(5_000.0, 50.0, Color::RED));
        let series = vec![series];
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            None,
            400.0,
            &MonospaceMeasurer::default(),
        );
        assert_eq!(
            spans_of(&frame, &series[0]),
            vec![Some((0.0, 10.0)), Some((10.0, 15.0))]
        );
    }

    #[test]
    fn fixed_range_scales_to_drawable_width() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 20.0, Color::RED));
        let series = vec![series];
        let config = real_time_config().with_x_axis(XAxisConfig::default().with_max(100.0));
        let frame = build_frame(
            &series,
            &config,
            View::FixedRange,
            None,
            500.0,
            &MonospaceMeasurer::default(),
        );
        let span = frame.spans[&series[0].samples()[0].id()];
        assert_eq!(span.len(), 100.0);
    }

    #[test]
    fn markers_take_no_room() {
        let mut series = Series::new(1);
        series.append(Sample::new(Color::RED).with_key(0.0));
        series.append(Sample::new(Color::RED).with_key(1.0));
        let series = vec![series];
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            None,
            400.0,
            &MonospaceMeasurer::default(),
        );
        assert!(frame.spans.is_empty());
        assert!(frame.hits.is_empty());
    }

    #[test]
    fn bars_past_the_edge_are_not_drawn() {
        let mut series = Series::new(1);
        for key in 0..3 {
            series.append(Sample::keyed(f64::from(key), 400.0, Color::RED));
        }
        let series = vec![series];
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            None,
            100.0,
            &MonospaceMeasurer::default(),
        );
        let spans: Vec<BarSpan> = series[0]
            .samples()
            .iter()
            .map(|sample| frame.spans[&sample.id()])
            .collect();
        assert!(spans[0].drawn && spans[1].drawn);
        assert!(!spans[2].drawn);
        assert_eq!(spans[2].start, 80.0);
        assert_eq!(frame.hits.len(), 2);
    }

    #[test]
    fn value_text_only_when_it_fits() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(0.0, 10.0, Color::RED));
        series.append(Sample::keyed(1.0, 2000.0, Color::RED));
        let series = vec![series];
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            None,
            400.0,
            &MonospaceMeasurer::default(),
        );
        assert_eq!(texts(&frame), vec!["2000"]);
    }

    #[test]
    fn value_text_skipped_for_short_bars() {
        let mut series = Series::new(1).with_bar_height(4.0);
        series.append(Sample::keyed(0.0, 3000.0, Color::RED));
        let series = vec![series];
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            None,
            400.0,
            &MonospaceMeasurer::default(),
        );
        assert!(texts(&frame).is_empty());
        assert_eq!(frame.hits.len(), 1);
    }

    #[test]
    fn frame_starts_with_clear_then_axes() {
        let series = vec![Series::new(1).with_label("cpu")];
        let config = ChartConfig::default().with_x_axis(XAxisConfig::default().with_label("time"));
        let frame = build_frame(
            &series,
            &config,
            View::FixedRange,
            None,
            300.0,
            &MonospaceMeasurer::default(),
        );
        let commands = frame.render.commands();
        assert_eq!(commands[0], RenderCommand::Clear(Color::TRANSPARENT));
        match &commands[1] {
            RenderCommand::Polyline { points, style } => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[1].x, frame.layout.label_column);
                assert_eq!(points[1].y, frame.layout.axis_y());
                assert_eq!(style.width, 2.0);
            }
            other => panic!("expected axes, got {other:?}"),
        }
        assert_eq!(texts(&frame), vec!["time", "cpu"]);
        assert_eq!(frame.size.over_sample, 3.0);
    }

    #[test]
    fn disabled_series_are_skipped() {
        let mut hidden = Series::new(2).with_disabled(true);
        hidden.append(Sample::keyed(0.0, 10.0, Color::RED));
        let series = vec![Series::new(1), hidden];
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            None,
            400.0,
            &MonospaceMeasurer::default(),
        );
        assert!(frame.spans.is_empty());
    }

    #[test]
    fn tooltip_overlay_is_painted_last() {
        let series = vec![Series::new(1)];
        let tooltip = Tooltip {
            position: ScreenPoint::new(30.0, 12.0),
            lines: vec!["X: 1".to_string(), "Value: 2".to_string()],
        };
        let frame = build_frame(
            &series,
            &real_time_config(),
            View::RealTime,
            Some(&tooltip),
            400.0,
            &MonospaceMeasurer::default(),
        );
        let commands = frame.render.commands();
        let overlay = &commands[commands.len() - 3];
        match overlay {
            RenderCommand::Rect { rect, style } => {
                assert_eq!(rect.min, tooltip.position);
                assert!(style.stroke.is_some());
            }
            other => panic!("expected tooltip box, got {other:?}"),
        }
        assert_eq!(texts(&frame), vec!["X: 1", "Value: 2"]);
    }
}
