//! Population-vector decoding of a spike response.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::geometry::wrap_distance;

/// Squared circular error assigned to a trial with no spikes at all, i.e.,
/// the expected squared error of a uniform random guess on the circle.
pub const UNIFORM_GUESS_SQUARED_ERROR: f64 = PI * PI / 3.0;

/// The outcome of decoding one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodeResult {
    /// The estimated stimulus angle, or `None` when the population response
    /// is uniformly zero and carries no direction at all.
    pub estimate: Option<f64>,
    /// The squared circular error of the estimate with respect to the true
    /// stimulus at sampling time.
    pub squared_error: f64,
}

/// Estimate the stimulus angle from a spike response by vector summation.
///
/// Each neuron contributes its spike count along its preferred direction; the
/// estimate is the direction of the summed vector. When both vector
/// components are exactly zero the estimate is undefined and the trial is
/// assigned the fixed squared error of a uniform random guess.
///
/// The spike counts and preferred angles must have the same length and order.
pub fn decode(spikes: &[u64], preferred_angles: &[f64], s_true: f64) -> DecodeResult {
    let (x, y) = spikes
        .iter()
        .zip_eq(preferred_angles.iter())
        .fold((0.0, 0.0), |(x, y), (&count, &mu)| {
            (x + count as f64 * mu.cos(), y + count as f64 * mu.sin())
        });

    if x == 0.0 && y == 0.0 {
        return DecodeResult {
            estimate: None,
            squared_error: UNIFORM_GUESS_SQUARED_ERROR,
        };
    }

    let s_est = y.atan2(x);
    DecodeResult {
        estimate: Some(s_est),
        squared_error: wrap_distance(s_est, s_true).powi(2),
    }
}
