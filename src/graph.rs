//! Bounded time series for live plots.

use std::collections::VecDeque;

/// Keeps the most recent `capacity` `(t, value)` samples.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    capacity: usize,
    samples: VecDeque<(f64, f64)>,
}

impl TimeSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            samples: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Appends a sample, dropping the oldest once full.
    pub fn push(&mut self, t: f64, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((t, value));
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|&(t, v)| [t, v]).collect()
    }
}
