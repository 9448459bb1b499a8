//! Running decoding-error statistics.

use serde::{Deserialize, Serialize};

/// Running mean of the squared decoding error over the trials of one run.
///
/// The series holds one value per completed trial: the mean of all squared
/// errors recorded so far, updated incrementally rather than recomputed from
/// scratch. It is append-only for the duration of a run and cleared only when
/// the session resets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorTracker {
    means: Vec<f64>,
}

impl ErrorTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        ErrorTracker { means: vec![] }
    }

    /// Record the squared error of one trial and return the updated running mean.
    pub fn record(&mut self, squared_error: f64) -> f64 {
        let mean = match self.means.last() {
            None => squared_error,
            Some(&last) => last + (squared_error - last) / (self.means.len() + 1) as f64,
        };
        self.means.push(mean);
        mean
    }

    /// Returns the running mean after the latest trial, if any trial was recorded.
    pub fn last(&self) -> Option<f64> {
        self.means.last().copied()
    }

    /// Returns the number of recorded trials.
    pub fn num_trials(&self) -> usize {
        self.means.len()
    }

    /// Returns the whole series of running means, one per trial.
    pub fn means(&self) -> &[f64] {
        &self.means[..]
    }

    /// Clear the series for a new run.
    pub fn clear(&mut self) {
        self.means.clear();
    }
}
