//! The ring of tuning-curve neurons.

use serde::{Deserialize, Serialize};

use crate::error::PopCodeError;
use crate::geometry::TWO_PI;
use crate::tuning::TuningCurve;

/// An ordered ring of neurons with evenly spaced preferred angles.
///
/// Neuron `i` of `N` prefers the angle `i / N * 2π`, so all preferred angles
/// lie in `[0, 2π)` and are strictly increasing in the neuron index. The ring
/// is immutable; reconfiguring the neuron count builds a new ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronRing {
    preferred_angles: Vec<f64>,
}

impl NeuronRing {
    /// Create a ring with the specified number of neurons.
    /// The function returns an error for an empty ring.
    pub fn new(num_neurons: usize) -> Result<Self, PopCodeError> {
        if num_neurons == 0 {
            return Err(PopCodeError::InvalidParameter(
                "The number of neurons must be positive.".to_string(),
            ));
        }

        let preferred_angles = (0..num_neurons)
            .map(|i| i as f64 / num_neurons as f64 * TWO_PI)
            .collect();

        Ok(NeuronRing { preferred_angles })
    }

    /// Returns the number of neurons in the ring.
    pub fn num_neurons(&self) -> usize {
        self.preferred_angles.len()
    }

    /// Returns the preferred angles of the neurons, in index order.
    pub fn preferred_angles(&self) -> &[f64] {
        &self.preferred_angles[..]
    }

    /// Returns the expected firing rate of every neuron for the given stimulus.
    ///
    /// This is the tuning profile of the whole population, used both for
    /// spike sampling and for display.
    pub fn rates(&self, s: f64, curve: TuningCurve, sigma: f64, r_max: f64) -> Vec<f64> {
        self.preferred_angles
            .iter()
            .map(|&mu| curve.rate(s, mu, sigma, r_max))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_ring_new_empty() {
        assert_eq!(
            NeuronRing::new(0),
            Err(PopCodeError::InvalidParameter(
                "The number of neurons must be positive.".to_string()
            ))
        );
    }

    #[test]
    fn test_ring_angles_evenly_spaced() {
        let ring = NeuronRing::new(4).unwrap();
        assert_eq!(ring.num_neurons(), 4);
        assert_eq!(
            ring.preferred_angles(),
            &[0.0, PI / 2.0, PI, 3.0 * PI / 2.0]
        );
    }

    #[test]
    fn test_ring_angles_in_range_and_increasing() {
        let ring = NeuronRing::new(17).unwrap();
        for angles in ring.preferred_angles().windows(2) {
            assert!(angles[0] < angles[1]);
        }
        for &angle in ring.preferred_angles() {
            assert!((0.0..TWO_PI).contains(&angle));
        }
    }

    #[test]
    fn test_ring_rates_profile() {
        let ring = NeuronRing::new(8).unwrap();
        let rates = ring.rates(0.0, TuningCurve::Gaussian, 0.5, 1.0);
        assert_eq!(rates.len(), 8);
        // The neuron preferring the stimulus fires at the peak rate.
        assert_relative_eq!(rates[0], 1.0);
        // Neurons equally far on either side of the stimulus fire equally.
        assert_relative_eq!(rates[1], rates[7], epsilon = 1e-12);
        assert!(rates[1] < rates[0]);
    }
}
