//! Frame loop plumbing between a chart and a drawing surface.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::axis::TextMeasurer;
use crate::chart::Chart;
use crate::frame::ChartFrame;
use crate::geom::ScreenPoint;
use crate::interaction::HitRegion;
use crate::render::{FrameSize, RenderList};

/// Drawing target for a [`ChartStream`].
///
/// Surfaces measure text for layout, accept a size for each frame, and paint
/// the frame's render list.
pub trait Surface: TextMeasurer {
    /// Current logical width in pixels.
    fn width(&self) -> f32;

    /// Resize to the frame's logical size and oversample factor.
    fn resize(&mut self, size: FrameSize);

    /// Paint a frame.
    fn draw(&mut self, render: &RenderList);

    /// Ask the host to schedule another frame.
    fn request_frame(&mut self) {}
}

/// A handle for mutating a [`Chart`] while it streams.
///
/// The handle clones cheaply and can be moved to producer threads. Appends
/// made through it are serialized with the render pass.
#[derive(Clone, Debug)]
pub struct ChartHandle {
    chart: Arc<RwLock<Chart>>,
}

impl ChartHandle {
    pub(crate) fn new(chart: Chart) -> Self {
        Self {
            chart: Arc::new(RwLock::new(chart)),
        }
    }

    /// Read the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Chart) -> R) -> R {
        let chart = self.chart.read();
        f(&chart)
    }

    /// Mutate the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Chart) -> R) -> R {
        let mut chart = self.chart.write();
        f(&mut chart)
    }
}

/// A validated chart bound to a surface.
///
/// Call [`ChartStream::render_frame`] whenever the surface asks for a frame.
/// Dropping the stream stops it.
pub struct ChartStream<S> {
    chart: ChartHandle,
    surface: S,
    frames: u64,
}

impl<S: Surface> ChartStream<S> {
    pub(crate) fn new(chart: Chart, surface: S) -> Self {
        Self {
            chart: ChartHandle::new(chart),
            surface,
            frames: 0,
        }
    }

    /// Lay out, paint, and schedule one frame.
    ///
    /// The chart stays write-locked while the frame is built and evicted.
    pub fn render_frame(&mut self) -> ChartFrame {
        let width = self.surface.width();
        let frame = self.chart.write(|chart| chart.render(width, &self.surface));
        if self.frames == 0 {
            tracing::debug!(
                width = frame.size.width,
                height = frame.size.height,
                over_sample = frame.size.over_sample,
                "first chart frame"
            );
        }
        self.frames += 1;
        self.surface.resize(frame.size);
        self.surface.draw(&frame.render);
        self.surface.request_frame();
        frame
    }

    /// Forward a pointer move in logical surface coordinates.
    pub fn pointer_moved(&self, point: ScreenPoint) {
        self.chart.write(|chart| chart.pointer_moved(point));
    }

    /// Forward the pointer leaving the surface.
    pub fn pointer_left(&self) {
        self.chart.write(Chart::pointer_left);
    }

    /// Forward a click; returns the bars under it.
    pub fn pointer_clicked(&self, point: ScreenPoint) -> Vec<HitRegion> {
        self.chart.read(|chart| chart.pointer_clicked(point))
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Handle for appending data while streaming.
    pub fn handle(&self) -> ChartHandle {
        self.chart.clone()
    }

    /// Access the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Access the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Stop streaming and return the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
