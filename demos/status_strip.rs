use std::time::Duration;

use gpui::prelude::*;
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, div,
    px, size,
};
use tracing_subscriber::EnvFilter;

use gpui_hcharts::{
    Chart, ChartConfig, ChartHandle, Color, GpuiChartView, Sample, Series, View, XAxisConfig,
};

const STATES: [(&str, &str); 3] = [("idle", "#9E9E9E"), ("busy", "#E53935"), ("wait", "#FDD835")];

struct StatusDemo {
    chart: gpui::Entity<GpuiChartView>,
}

impl gpui::Render for StatusDemo {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        _cx: &mut gpui::Context<Self>,
    ) -> impl gpui::IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .p_4()
            .bg(gpui::white())
            .child(self.chart.clone())
    }
}

fn build_chart() -> Chart {
    let config = ChartConfig::default()
        .with_background_color(Color::WHITE)
        .with_x_axis(
            XAxisConfig::default()
                .with_units_per_pixel(25.0)
                .with_label("time"),
        );
    Chart::builder()
        .config(config)
        .view(View::RealTime)
        .series(Series::new(1).with_label("pump"))
        .series(Series::new(2).with_label("valve"))
        .series(Series::new(3).with_label("heater").with_show_values(false))
        .build()
}

fn spawn_updates(window: &mut gpui::Window, cx: &mut gpui::App, handle: ChartHandle) {
    window
        .spawn(cx, move |_cx: &mut AsyncWindowContext| async move {
            let mut tick = 0_u64;
            loop {
                Timer::after(Duration::from_millis(250)).await;
                let now = chrono::Utc::now().timestamp_millis() as f64;
                handle.write(|chart| {
                    for series in chart.series_mut() {
                        let index = (tick + u64::from(series.position())) as usize % STATES.len();
                        let (name, hex) = STATES[index];
                        let color = Color::from_hex(hex).unwrap_or(Color::RED);
                        series.append(
                            Sample::keyed(now, 250.0, color).with_description(name),
                        );
                    }
                });
                tick += 1;
            }
        })
        .detach();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(220.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let view = GpuiChartView::stream(build_chart()).expect("chart is valid");
            spawn_updates(window, cx, view.handle());
            let chart = cx.new(|_| view);
            cx.new(|_| StatusDemo { chart })
        })
        .unwrap();
    });
}
