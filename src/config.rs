//! Simulation configuration.

use serde::{Deserialize, Serialize};
use serde_json;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::PopCodeError;
use crate::tuning::TuningCurve;
use crate::{DEFAULT_NUM_NEURONS, DEFAULT_PEAK_RATE, DEFAULT_TUNING_WIDTH};

/// The validated configuration of a simulation session.
///
/// A configuration is immutable; reconfiguring a session replaces it as a
/// whole. It takes effect on the next trial, never retroactively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    num_neurons: usize,
    sigma: f64,
    r_max: f64,
    curve: TuningCurve,
}

impl SimulationConfig {
    /// Create a configuration with the specified parameters.
    /// The function returns an error for a non-positive neuron count, tuning
    /// width or peak rate.
    pub fn build(
        num_neurons: usize,
        sigma: f64,
        r_max: f64,
        curve: TuningCurve,
    ) -> Result<Self, PopCodeError> {
        if num_neurons == 0 {
            return Err(PopCodeError::InvalidParameter(
                "The number of neurons must be positive.".to_string(),
            ));
        }

        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(PopCodeError::InvalidParameter(
                "The tuning width must be a positive finite number.".to_string(),
            ));
        }

        if !(r_max > 0.0 && r_max.is_finite()) {
            return Err(PopCodeError::InvalidParameter(
                "The peak rate must be a positive finite number.".to_string(),
            ));
        }

        Ok(SimulationConfig {
            num_neurons,
            sigma,
            r_max,
            curve,
        })
    }

    /// Returns the number of neurons in the ring.
    pub fn num_neurons(&self) -> usize {
        self.num_neurons
    }

    /// Returns the tuning width parameter.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the peak firing rate.
    pub fn r_max(&self) -> f64 {
        self.r_max
    }

    /// Returns the active tuning curve shape.
    pub fn curve(&self) -> TuningCurve {
        self.curve
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> std::io::Result<SimulationConfig> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_neurons: DEFAULT_NUM_NEURONS,
            sigma: DEFAULT_TUNING_WIDTH,
            r_max: DEFAULT_PEAK_RATE,
            curve: TuningCurve::Gaussian,
        }
    }
}
