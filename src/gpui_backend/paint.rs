use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, Window, point, px, quad,
};

use crate::frame::ChartFrame;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineStyle, RectStyle, RenderCommand, TextStyle};

use super::text::text_run;

/// Paint a frame whose coordinates are relative to `origin`.
pub(crate) fn paint_frame(
    frame: &ChartFrame,
    origin: ScreenPoint,
    window: &mut Window,
    cx: &mut App,
) {
    let surface = ScreenRect::from_origin_size(
        ScreenPoint::new(0.0, 0.0),
        frame.size.width,
        frame.size.height,
    );
    for command in frame.render.commands() {
        match command {
            RenderCommand::Clear(color) => {
                paint_rect(window, origin, surface, RectStyle::filled(*color));
            }
            RenderCommand::Rect { rect, style } => {
                paint_rect(window, origin, *rect, *style);
            }
            RenderCommand::Polyline { points, style } => {
                paint_polyline(window, origin, points, *style);
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                paint_text(window, cx, offset(origin, *position), text, style);
            }
        }
    }
}

fn paint_polyline(
    window: &mut Window,
    origin: ScreenPoint,
    points: &[ScreenPoint],
    style: LineStyle,
) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    builder.move_to(to_point(offset(origin, *first)));
    for pt in rest {
        builder.line_to(to_point(offset(origin, *pt)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_rect(window: &mut Window, origin: ScreenPoint, rect: ScreenRect, style: RectStyle) {
    let (stroke_width, stroke_color) = match style.stroke {
        Some(stroke) => (stroke.width, stroke.color),
        None => (0.0, Color::TRANSPARENT),
    };
    window.paint_quad(quad(
        to_bounds(origin, rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(stroke_width)),
        to_rgba(stroke_color),
        BorderStyle::default(),
    ));
}

/// Outlined text is drawn as offset copies in the outline color under the fill.
fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    if let Some(outline) = style.outline {
        let w = outline.width;
        for (dx, dy) in [(-w, 0.0), (w, 0.0), (0.0, -w), (0.0, w)] {
            let shifted = ScreenPoint::new(position.x + dx, position.y + dy);
            paint_text_run(window, cx, shifted, text, style, outline.color);
        }
    }
    paint_text_run(window, cx, position, text, style, style.color);
}

fn paint_text_run(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
    color: Color,
) {
    let run = text_run(text, &style.font, to_hsla(color));
    let shaped =
        window
            .text_system()
            .shape_line(text.to_string().into(), px(style.font.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let _ = shaped.paint(to_point(position), line_height, window, cx);
}

fn offset(origin: ScreenPoint, pt: ScreenPoint) -> ScreenPoint {
    ScreenPoint::new(origin.x + pt.x, origin.y + pt.y)
}

fn to_point(pt: ScreenPoint) -> gpui::Point<Pixels> {
    point(px(pt.x), px(pt.y))
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(origin: ScreenPoint, rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        to_point(offset(origin, rect.min)),
        to_point(offset(origin, rect.max)),
    )
}
