//! Trimming of samples that scrolled out of the retained window.

use super::{Sample, SampleBuffer};

impl SampleBuffer {
    /// Drop samples older than the trailing run that fills `retained_width`.
    ///
    /// Walks from the tail accumulating laid-out span lengths. Once the sum
    /// exceeds `retained_width`, everything before the current sample is
    /// removed. A sample without a laid-out span stops the walk and nothing is
    /// removed. Returns the number of removed samples.
    pub(crate) fn evict_trailing(
        &mut self,
        retained_width: f32,
        span_len: impl Fn(&Sample) -> Option<f32>,
    ) -> usize {
        let mut accumulated = 0.0_f32;
        for index in (0..self.samples.len()).rev() {
            let Some(len) = span_len(&self.samples[index]) else {
                return 0;
            };
            accumulated += len.abs();
            if accumulated > retained_width {
                self.drain_front(index);
                return index;
            }
        }
        0
    }

    /// Keep at most `max` trailing samples. Returns the number removed.
    pub(crate) fn retain_last(&mut self, max: usize) -> usize {
        let excess = self.samples.len().saturating_sub(max);
        if excess > 0 {
            self.drain_front(excess);
        }
        excess
    }
}
