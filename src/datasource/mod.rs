//! Samples and ordered sample storage.
//!
//! The data layer keeps every series sorted by key while accepting samples in
//! any order, and supports trimming old samples once they scroll out of view.

mod retention;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::render::Color;

static SAMPLE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a sample.
///
/// Identifiers are assigned at construction and survive reordering, so render
/// state computed for a frame can be looked up after the series changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId(u64);

impl SampleId {
    fn next() -> Self {
        Self(SAMPLE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// One discrete data point of a series.
///
/// A sample without a key is stacked right after its predecessor. A sample
/// without a value is a marker: it has no bar length.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    id: SampleId,
    key: Option<f64>,
    color: Color,
    value: Option<f64>,
    description: String,
}

impl Sample {
    /// Create an unkeyed marker sample with the given color.
    pub fn new(color: Color) -> Self {
        Self {
            id: SampleId::next(),
            key: None,
            color,
            value: None,
            description: String::new(),
        }
    }

    /// Create a keyed sample with a value.
    pub fn keyed(key: f64, value: f64, color: Color) -> Self {
        Self::new(color).with_key(key).with_value(value)
    }

    /// Set the ordering key. Non-finite keys leave the key unset.
    pub fn with_key(mut self, key: f64) -> Self {
        self.key = key.is_finite().then_some(key);
        self
    }

    /// Set the value. Non-finite values leave the value unset.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value.is_finite().then_some(value);
        self
    }

    /// Set the description shown in tooltips.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Access the sample identifier.
    pub fn id(&self) -> SampleId {
        self.id
    }

    /// Access the ordering key.
    pub fn key(&self) -> Option<f64> {
        self.key
    }

    /// Access the color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Access the value.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Access the description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self::new(Color::RED)
    }
}

/// Result of appending a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The sample was inserted at the given index.
    Inserted {
        /// Index of the new sample.
        index: usize,
    },
    /// The sample replaced an existing sample with the same key.
    Replaced {
        /// Index of the replaced sample.
        index: usize,
    },
    /// A sample with the same key exists and replacement is disabled.
    Dropped,
}

/// Which presence flag differs between adjacent samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inconsistency {
    Key { index: usize },
    Value { index: usize },
}

/// Key-ordered sample storage.
#[derive(Debug, Clone, Default)]
pub(crate) struct SampleBuffer {
    samples: Vec<Sample>,
}

impl SampleBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a sample keeping keyed samples in ascending key order.
    ///
    /// The search walks backward from the tail: new samples usually arrive in
    /// order, so it ends after a step or two. Unkeyed samples are skipped by
    /// the search and keep their relative order.
    pub(crate) fn insert(&mut self, sample: Sample, replace: bool) -> AppendOutcome {
        let Some(key) = sample.key else {
            self.samples.push(sample);
            return AppendOutcome::Inserted {
                index: self.samples.len() - 1,
            };
        };

        let mut found = None;
        for index in (0..self.samples.len()).rev() {
            match self.samples[index].key {
                None => continue,
                Some(existing) if existing > key => continue,
                Some(_) => {
                    found = Some(index);
                    break;
                }
            }
        }

        match found {
            None => {
                self.samples.insert(0, sample);
                AppendOutcome::Inserted { index: 0 }
            }
            Some(index) if self.samples[index].key == Some(key) => {
                if replace {
                    self.samples[index] = sample;
                    AppendOutcome::Replaced { index }
                } else {
                    AppendOutcome::Dropped
                }
            }
            Some(index) => {
                self.samples.insert(index + 1, sample);
                AppendOutcome::Inserted { index: index + 1 }
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    pub(crate) fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub(crate) fn get(&self, id: SampleId) -> Option<&Sample> {
        self.samples.iter().find(|sample| sample.id == id)
    }

    /// Find the first adjacent pair whose key or value presence differs.
    pub(crate) fn first_inconsistency(&self) -> Option<Inconsistency> {
        for (offset, pair) in self.samples.windows(2).enumerate() {
            let index = offset + 1;
            if pair[0].key.is_some() != pair[1].key.is_some() {
                return Some(Inconsistency::Key { index });
            }
            if pair[0].value.is_some() != pair[1].value.is_some() {
                return Some(Inconsistency::Value { index });
            }
        }
        None
    }

    fn drain_front(&mut self, count: usize) {
        self.samples.drain(..count);
    }
}
