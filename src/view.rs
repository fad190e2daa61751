//! View modes.

/// How values map onto the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum View {
    /// Whole-dataset scale: the axis spans `0..=x_axis.max` across the drawable width.
    #[default]
    FixedRange,
    /// Scrolling window with a fixed units-per-pixel ratio; old samples are evicted.
    RealTime,
}

impl View {
    /// Check whether the view scrolls and evicts.
    pub fn is_real_time(self) -> bool {
        matches!(self, Self::RealTime)
    }
}
