use std::time::Duration;

use gpui_hcharts::{
    Chart, ChartConfig, Color, Font, FrameSize, MonospaceMeasurer, RenderCommand, RenderList,
    Sample, ScreenPoint, Series, Surface, TextMeasurer, View, XAxisConfig,
};
use tracing_subscriber::EnvFilter;

/// Surface that prints a summary of every frame.
struct PrintSurface {
    width: f32,
    measurer: MonospaceMeasurer,
}

impl TextMeasurer for PrintSurface {
    fn measure(&self, text: &str, font: &Font) -> (f32, f32) {
        self.measurer.measure(text, font)
    }
}

impl Surface for PrintSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn resize(&mut self, size: FrameSize) {
        let (w, h) = size.backing_size();
        println!("frame {}x{} (backing {w}x{h})", size.width, size.height);
    }

    fn draw(&mut self, render: &RenderList) {
        let bars = render
            .commands()
            .iter()
            .filter(|command| matches!(command, RenderCommand::Rect { .. }))
            .count();
        println!("  {} commands, {bars} bars", render.len());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let frames: usize = std::env::var("FRAMES")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(20);

    let chart = Chart::builder()
        .config(
            ChartConfig::default().with_x_axis(
                XAxisConfig::default()
                    .with_units_per_pixel(5.0)
                    .with_time_keys(false),
            ),
        )
        .view(View::RealTime)
        .series(Series::new(1).with_label("cpu"))
        .series(Series::new(2).with_label("disk"))
        .build();

    let surface = PrintSurface {
        width: 320.0,
        measurer: MonospaceMeasurer::default(),
    };
    let mut stream = match chart.stream_to(surface) {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("invalid chart: {err}");
            return;
        }
    };

    let handle = stream.handle();
    for frame in 0..frames {
        handle.write(|chart| {
            for series in chart.series_mut() {
                let value = 40.0 + f64::from(series.position()) * 15.0;
                let color = if frame % 2 == 0 { Color::RED } else { Color::BLACK };
                series.append(Sample::keyed(frame as f64, value, color));
            }
        });
        stream.render_frame();
        std::thread::sleep(Duration::from_millis(16));
    }

    stream.pointer_moved(ScreenPoint::new(60.0, 10.0));
    stream.render_frame();
    handle.read(|chart| {
        if let Some(tooltip) = chart.tooltip() {
            println!("tooltip: {}", tooltip.lines.join(" | "));
        }
        for series in chart.series() {
            println!("{}: {} samples retained", series.label(), series.len());
        }
    });
}
