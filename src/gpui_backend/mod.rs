//! GPUI integration for gpui_hcharts.
//!
//! This module provides a GPUI view that streams a [`Chart`](crate::chart::Chart)
//! frame by frame and forwards pointer hover, leave, and click events to it.

mod paint;
mod text;
mod view;

pub use view::GpuiChartView;
