use std::cell::Cell;
use std::rc::Rc;

use gpui::prelude::*;
use gpui::{
    App, MouseButton, MouseDownEvent, MouseMoveEvent, Pixels, Point, Window, canvas, div, px,
};

use crate::chart::Chart;
use crate::error::ValidationError;
use crate::geom::ScreenPoint;
use crate::interaction::HitRegion;
use crate::stream::ChartHandle;

use super::paint::paint_frame;
use super::text::GpuiTextMeasurer;

type ClickHandler = Rc<dyn Fn(&[HitRegion], &mut Window, &mut App)>;

/// A GPUI view that streams a [`Chart`].
///
/// Every paint builds a fresh frame, evicts scrolled-out samples, and asks
/// for the next animation frame. Pointer moves update the tooltip and clicks
/// report the bars under the pointer.
#[derive(Clone)]
pub struct GpuiChartView {
    chart: ChartHandle,
    origin: Rc<Cell<ScreenPoint>>,
    on_click: Option<ClickHandler>,
}

impl GpuiChartView {
    /// Validate the chart and wrap it in a view.
    ///
    /// Nothing is drawn when validation fails.
    pub fn stream(chart: Chart) -> Result<Self, ValidationError> {
        chart.start()?;
        Ok(Self {
            chart: ChartHandle::new(chart),
            origin: Rc::new(Cell::new(ScreenPoint::default())),
            on_click: None,
        })
    }

    /// Call `handler` with the bars under each left click.
    pub fn with_click_handler(
        mut self,
        handler: impl Fn(&[HitRegion], &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Get a handle for mutating the underlying chart.
    ///
    /// This is useful for streaming samples from async tasks.
    pub fn handle(&self) -> ChartHandle {
        self.chart.clone()
    }

    fn local_point(&self, position: Point<Pixels>) -> ScreenPoint {
        let origin = self.origin.get();
        ScreenPoint::new(
            f32::from(position.x) - origin.x,
            f32::from(position.y) - origin.y,
        )
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = self.local_point(ev.position);
        self.chart.write(|chart| chart.pointer_moved(pos));
        cx.notify();
    }

    fn on_mouse_down(
        &mut self,
        ev: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let pos = self.local_point(ev.position);
        let hits = self.chart.read(|chart| chart.pointer_clicked(pos));
        tracing::trace!(x = pos.x, y = pos.y, hits = hits.len(), "chart clicked");
        if let Some(handler) = self.on_click.as_ref() {
            handler(&hits, window, cx);
        }
    }

    fn on_hover(&mut self, hovered: bool, cx: &mut Context<Self>) {
        if !hovered {
            self.chart.write(Chart::pointer_left);
            cx.notify();
        }
    }
}

impl Render for GpuiChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let chart = self.chart.clone();
        let origin = Rc::clone(&self.origin);
        let height = self.chart.read(Chart::surface_height);

        div()
            .id("gpui-hcharts")
            .w_full()
            .h(px(height))
            .child(
                canvas(
                    move |bounds, window, _| {
                        origin.set(ScreenPoint::new(
                            f32::from(bounds.origin.x),
                            f32::from(bounds.origin.y),
                        ));
                        let measurer = GpuiTextMeasurer::new(window);
                        let width = f32::from(bounds.size.width);
                        chart.write(|chart| chart.render(width, &measurer))
                    },
                    move |bounds, frame, window, cx| {
                        let origin = ScreenPoint::new(
                            f32::from(bounds.origin.x),
                            f32::from(bounds.origin.y),
                        );
                        paint_frame(&frame, origin, window, cx);
                        window.request_animation_frame();
                    },
                )
                .size_full(),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_hover(cx.listener(|this, hovered: &bool, _, cx| {
                this.on_hover(*hovered, cx);
            }))
    }
}
