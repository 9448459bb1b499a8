//! Tuning curves mapping a stimulus angle to an expected firing rate.

use serde::{Deserialize, Serialize};

use crate::error::PopCodeError;
use crate::geometry::wrap_distance;

/// The shape of a neuron's tuning curve.
///
/// Each shape is a pure function of the stimulus angle, the neuron's
/// preferred angle, the width parameter and the peak rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuningCurve {
    /// Circular Gaussian bump, peaked at the preferred angle. Always positive.
    Gaussian,
    /// All-or-nothing window on the wrapped distance to the preferred angle.
    Square,
    /// Sine of the scaled wrapped distance. Sign-unbounded and not scaled by
    /// the peak rate; clamp before using it as a Poisson rate.
    Sine,
}

impl TuningCurve {
    /// Parse a curve shape from its lowercase name.
    pub fn from_str(name: &str) -> Result<Self, PopCodeError> {
        match name {
            "gaussian" => Ok(TuningCurve::Gaussian),
            "square" => Ok(TuningCurve::Square),
            "sine" => Ok(TuningCurve::Sine),
            _ => Err(PopCodeError::UnknownCurve(name.to_string())),
        }
    }

    /// Expected firing rate for stimulus `s` of a neuron with preferred angle `mu`.
    pub fn rate(&self, s: f64, mu: f64, sigma: f64, r_max: f64) -> f64 {
        let wd = wrap_distance(s, mu);
        match self {
            TuningCurve::Gaussian => r_max * (-wd.powi(2) / (2.0 * sigma.powi(2))).exp(),
            // The threshold applies to the signed distance, not its magnitude,
            // so the window covers all of (-PI, sigma).
            TuningCurve::Square => {
                if wd < sigma {
                    r_max
                } else {
                    0.0
                }
            }
            TuningCurve::Sine => (wd / sigma).sin(),
        }
    }
}

impl Default for TuningCurve {
    fn default() -> Self {
        TuningCurve::Gaussian
    }
}
