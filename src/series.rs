//! Chart rows: configuration and ordered sample storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::datasource::{AppendOutcome, Inconsistency, Sample, SampleBuffer, SampleId};
use crate::error::ValidationError;
use crate::frame::BarSpan;

static SERIES_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(SERIES_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Row-level display configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeriesConfig {
    /// Bar height in pixels.
    pub bar_height: f32,
    /// Draw sample values inside their bars.
    pub show_values: bool,
    /// Row label. Empty labels fall back to the series position.
    pub label_text: String,
    /// Replace an existing sample when a new one has the same key.
    pub replace_on_duplicate_key: bool,
    /// Hide the row.
    pub disabled: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            bar_height: 22.0,
            show_values: true,
            label_text: String::new(),
            replace_on_duplicate_key: false,
            disabled: false,
        }
    }
}

/// One horizontal row of the chart.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    position: u32,
    config: SeriesConfig,
    data: SampleBuffer,
}

impl Series {
    /// Create a series at the given position (1 is the top row).
    pub fn new(position: u32) -> Self {
        Self::with_config(position, SeriesConfig::default())
    }

    /// Create a series with an explicit configuration.
    pub fn with_config(position: u32, config: SeriesConfig) -> Self {
        Self {
            id: SeriesId::next(),
            position,
            config,
            data: SampleBuffer::new(),
        }
    }

    /// Set the bar height.
    pub fn with_bar_height(mut self, bar_height: f32) -> Self {
        self.config.bar_height = bar_height;
        self
    }

    /// Toggle value text inside bars.
    pub fn with_show_values(mut self, show_values: bool) -> Self {
        self.config.show_values = show_values;
        self
    }

    /// Set the row label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.config.label_text = label.into();
        self
    }

    /// Set the duplicate-key policy.
    pub fn with_replace_on_duplicate_key(mut self, replace: bool) -> Self {
        self.config.replace_on_duplicate_key = replace;
        self
    }

    /// Hide or show the row.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Access the series identifier.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Access the series position.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Access the configuration.
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Access the configuration mutably.
    pub fn config_mut(&mut self) -> &mut SeriesConfig {
        &mut self.config
    }

    /// Check whether the row is drawn.
    pub fn is_enabled(&self) -> bool {
        !self.config.disabled
    }

    /// Text shown in the label column.
    pub fn label(&self) -> String {
        if self.config.label_text.is_empty() {
            self.position.to_string()
        } else {
            self.config.label_text.clone()
        }
    }

    /// Add a sample, keeping keyed samples in ascending order.
    pub fn append(&mut self, sample: Sample) -> AppendOutcome {
        let key = sample.key();
        let outcome = self
            .data
            .insert(sample, self.config.replace_on_duplicate_key);
        if outcome == AppendOutcome::Dropped {
            tracing::trace!(position = self.position, ?key, "duplicate key dropped");
        }
        outcome
    }

    /// Remove all samples.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Access samples in display order.
    pub fn samples(&self) -> &[Sample] {
        self.data.samples()
    }

    /// Look up a sample by identifier.
    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.data.get(id)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check that adjacent samples agree on key and value presence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.data.first_inconsistency() {
            None => Ok(()),
            Some(Inconsistency::Key { index }) => Err(ValidationError::MixedKeyPresence {
                position: self.position,
                index,
            }),
            Some(Inconsistency::Value { index }) => Err(ValidationError::MixedValuePresence {
                position: self.position,
                index,
            }),
        }
    }

    /// Drop samples that scrolled out of a window `retained_width` pixels wide.
    ///
    /// `spans` must come from a frame built after the last append; samples
    /// without a span stop the eviction.
    pub fn evict(&mut self, spans: &HashMap<SampleId, BarSpan>, retained_width: f32) -> usize {
        let removed = self.data.evict_trailing(retained_width, |sample| {
            spans.get(&sample.id()).map(BarSpan::len)
        });
        if removed > 0 {
            tracing::trace!(position = self.position, removed, "evicted samples");
        }
        removed
    }

    /// Keep at most `max` trailing samples.
    pub fn retain_last(&mut self, max: usize) -> usize {
        self.data.retain_last(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn defaults_match_documented_values() {
        let series = Series::new(1);
        assert_eq!(series.config().bar_height, 22.0);
        assert!(series.config().show_values);
        assert!(!series.config().replace_on_duplicate_key);
        assert!(series.is_enabled());
        assert_eq!(series.label(), "1");
    }

    #[test]
    fn explicit_label_wins_over_position() {
        let series = Series::new(3).with_label("pump");
        assert_eq!(series.label(), "pump");
    }

    #[test]
    fn duplicate_key_keeps_original_by_default() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(5.0, 1.0, Color::RED));
        assert_eq!(
            series.append(Sample::keyed(5.0, 2.0, Color::RED)),
            AppendOutcome::Dropped
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series.samples()[0].value(), Some(1.0));
    }

    #[test]
    fn duplicate_key_replaces_when_enabled() {
        let mut series = Series::new(1).with_replace_on_duplicate_key(true);
        series.append(Sample::keyed(5.0, 1.0, Color::RED));
        series.append(Sample::keyed(5.0, 2.0, Color::RED));
        assert_eq!(series.len(), 1);
        assert_eq!(series.samples()[0].value(), Some(2.0));
    }

    #[test]
    fn validate_rejects_mixed_values() {
        let mut series = Series::new(2);
        series.append(Sample::keyed(0.0, 10.0, Color::RED));
        series.append(Sample::new(Color::RED).with_key(1.0));
        assert_eq!(
            series.validate(),
            Err(ValidationError::MixedValuePresence {
                position: 2,
                index: 1
            })
        );
    }

    #[test]
    fn validate_accepts_all_markers() {
        let mut series = Series::new(1);
        series.append(Sample::new(Color::RED).with_key(0.0));
        series.append(Sample::new(Color::RED).with_key(1.0));
        assert_eq!(series.validate(), Ok(()));
    }

    #[test]
    fn evict_uses_frame_spans() {
        let mut series = Series::new(1);
        let mut spans = HashMap::new();
        let mut start = 0.0;
        for key in 0..4 {
            let sample = Sample::keyed(f64::from(key), 10.0, Color::RED);
            spans.insert(sample.id(), BarSpan::new(start, start + 10.0, true));
            start += 10.0;
            series.append(sample);
        }
        assert_eq!(series.evict(&spans, 15.0), 2);
        assert_eq!(series.samples()[0].key(), Some(2.0));
    }

    #[test]
    fn clear_empties_series() {
        let mut series = Series::new(1);
        series.append(Sample::keyed(1.0, 1.0, Color::RED));
        series.clear();
        assert!(series.is_empty());
    }
}
