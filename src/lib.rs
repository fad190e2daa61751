//! gpui_hcharts draws horizontal stacked bar charts that scroll in real time.
//! Each row holds keyed samples laid end to end; old samples are evicted once
//! they scroll out of view.

#![forbid(unsafe_code)]

pub mod axis;
pub mod chart;
pub mod config;
pub mod datasource;
pub mod error;
pub mod frame;
pub mod geom;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod series;
pub mod stream;
mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{KeyFormatter, LabelConfig, MonospaceMeasurer, TextMeasurer, XAxisConfig};
pub use chart::{Chart, ChartBuilder};
pub use config::{ChartConfig, DEFAULT_MAX_RETAINED_SAMPLES, TooltipConfig};
pub use datasource::{AppendOutcome, Sample, SampleId};
pub use error::{ColorParseError, ValidationError};
pub use frame::{BarSpan, ChartFrame};
#[cfg(feature = "gpui")]
pub use gpui_backend::GpuiChartView;
pub use geom::{ScreenPoint, ScreenRect};
pub use interaction::{HitRegion, Tooltip};
pub use layout::ChartLayout;
pub use render::{
    Color, Font, FrameSize, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
};
pub use series::{Series, SeriesConfig, SeriesId};
pub use stream::{ChartHandle, ChartStream, Surface};
pub use view::View;
