//! Trial scheduling and the simulation session state machine.
//!
//! A [`Session`] owns everything one simulation run needs: the validated
//! configuration, the neuron ring, the current stimulus, the running error
//! series and the random number generator. It is advanced by [`Session::tick`],
//! one trial per call, so it can be driven by a real timer or synchronously in
//! tests. Each tick reads a single snapshot of the tuning parameters; input
//! handlers may freely update the stimulus or configuration between ticks.

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SimulationConfig;
use crate::decoder;
use crate::error::PopCodeError;
use crate::ring::NeuronRing;
use crate::sampler;
use crate::tracker::ErrorTracker;
use crate::DEFAULT_STIMULUS;

/// A per-trial record emitted to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialReport {
    /// The 1-based index of the trial within its run.
    pub trial: usize,
    /// The spike count of every neuron, in ring order.
    pub spikes: Vec<u64>,
    /// The decoded stimulus angle, or `None` for an all-zero response.
    pub estimate: Option<f64>,
    /// The running mean squared decoding error after this trial.
    pub mean_squared_error: f64,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The configured number of trials completed.
    Completed,
    /// The run was stopped by an external command.
    Stopped,
}

/// An event produced by advancing or stopping a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// One trial of the Sampler -> Decoder -> Error Tracker pipeline.
    Trial(TrialReport),
    /// The run ended and the session state was reset.
    Ended(EndReason),
}

/// The bookkeeping of an active run.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    /// Completed trials so far.
    trial: usize,
    /// Configured total number of trials.
    num_trials: usize,
    /// Inter-trial interval.
    interval: Duration,
}

/// A simulation session: configuration, stimulus, error series and scheduler state.
#[derive(Debug)]
pub struct Session {
    config: SimulationConfig,
    ring: NeuronRing,
    stimulus: f64,
    estimate: Option<f64>,
    tracker: ErrorTracker,
    run: Option<Run>,
    rng: ChaCha8Rng,
}

impl Session {
    /// Create an idle session with the given configuration and a random seed.
    pub fn new(config: SimulationConfig) -> Self {
        Self::from_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Create an idle session with the given configuration and a fixed seed,
    /// so that repeated runs are reproducible.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::from_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(config: SimulationConfig, rng: ChaCha8Rng) -> Self {
        let ring = NeuronRing::new(config.num_neurons())
            .expect("a validated configuration has a positive neuron count");
        Session {
            config,
            ring,
            stimulus: DEFAULT_STIMULUS,
            estimate: None,
            tracker: ErrorTracker::new(),
            run: None,
            rng,
        }
    }

    /// Replace the configuration. The neuron ring is rebuilt when the neuron
    /// count changes; the new parameters apply from the next trial on.
    pub fn configure(&mut self, config: SimulationConfig) {
        if config.num_neurons() != self.ring.num_neurons() {
            self.ring = NeuronRing::new(config.num_neurons())
                .expect("a validated configuration has a positive neuron count");
        }
        self.config = config;
    }

    /// Update the true stimulus angle.
    pub fn set_stimulus(&mut self, angle: f64) {
        self.stimulus = angle;
    }

    /// Returns the current true stimulus angle.
    pub fn stimulus(&self) -> f64 {
        self.stimulus
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the neuron ring.
    pub fn ring(&self) -> &NeuronRing {
        &self.ring
    }

    /// Returns the estimate decoded in the latest trial of the current run.
    pub fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    /// Returns the series of running mean squared errors, one per completed trial.
    pub fn error_means(&self) -> &[f64] {
        self.tracker.means()
    }

    /// Returns whether a run is active.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Returns the number of completed trials in the current run.
    pub fn num_completed_trials(&self) -> usize {
        self.run.map_or(0, |run| run.trial)
    }

    /// Returns the inter-trial interval of the current run.
    pub fn interval(&self) -> Option<Duration> {
        self.run.map(|run| run.interval)
    }

    /// Start a run of `num_trials` trials fired every `interval_ms` milliseconds.
    ///
    /// The trial counter and the error series are reset. The function returns
    /// an error for a zero trial count or interval, or if a run is already
    /// active (stop it first).
    pub fn start(&mut self, num_trials: usize, interval_ms: u64) -> Result<(), PopCodeError> {
        if self.run.is_some() {
            return Err(PopCodeError::InvalidOperation(
                "The session is already running.".to_string(),
            ));
        }

        if num_trials == 0 {
            return Err(PopCodeError::InvalidParameter(
                "The number of trials must be positive.".to_string(),
            ));
        }

        if interval_ms == 0 {
            return Err(PopCodeError::InvalidParameter(
                "The inter-trial interval must be positive.".to_string(),
            ));
        }

        self.tracker.clear();
        self.estimate = None;
        self.run = Some(Run {
            trial: 0,
            num_trials,
            interval: Duration::from_millis(interval_ms),
        });

        info!(
            "Starting a run of {} trials every {} ms",
            num_trials, interval_ms
        );
        Ok(())
    }

    /// Advance the session by one timer tick.
    ///
    /// While a run is active, each tick executes one trial of the
    /// Sampler -> Decoder -> Error Tracker pipeline on a snapshot of the
    /// tuning parameters and returns the trial report. One tick after the
    /// last trial, the session resets to idle and returns the run-completed
    /// event. An idle session returns `None`.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        let run = self.run?;

        if run.trial == run.num_trials {
            self.reset();
            info!("Run completed after {} trials", run.num_trials);
            return Some(SessionEvent::Ended(EndReason::Completed));
        }

        // Snapshot of the tuning parameters for this trial.
        let stimulus = self.stimulus;
        let (curve, sigma, r_max) = (self.config.curve(), self.config.sigma(), self.config.r_max());

        let mut rates = self.ring.rates(stimulus, curve, sigma, r_max);
        // The sine curve can produce negative expected rates; sampling sees
        // them clamped at zero.
        for rate in rates.iter_mut() {
            *rate = rate.max(0.0);
        }

        let spikes = sampler::sample_response(&rates, &mut self.rng)
            .expect("clamped expected rates are non-negative");

        let result = decoder::decode(&spikes, self.ring.preferred_angles(), stimulus);
        self.estimate = result.estimate;
        let mean_squared_error = self.tracker.record(result.squared_error);

        let trial = run.trial + 1;
        if let Some(run) = self.run.as_mut() {
            run.trial = trial;
        }

        debug!(
            "Trial {}/{}: estimate {:?}, running MSE {:.6}",
            trial, run.num_trials, result.estimate, mean_squared_error
        );

        Some(SessionEvent::Trial(TrialReport {
            trial,
            spikes,
            estimate: result.estimate,
            mean_squared_error,
        }))
    }

    /// Stop the current run, if any.
    ///
    /// Stopping performs the same reset as natural completion and returns the
    /// run-stopped event; no further tick will execute a trial. Stopping an
    /// idle session returns `None`.
    pub fn stop(&mut self) -> Option<SessionEvent> {
        match self.run {
            None => None,
            Some(run) => {
                self.reset();
                info!("Run stopped after {} trials", run.trial);
                Some(SessionEvent::Ended(EndReason::Stopped))
            }
        }
    }

    /// Reset all per-run state: counter, series and latest estimate.
    fn reset(&mut self) {
        self.run = None;
        self.tracker.clear();
        self.estimate = None;
    }

    /// Drive a full run on the caller's thread, sleeping one inter-trial
    /// interval before each tick and forwarding every event to the callback.
    pub fn run<F>(
        &mut self,
        num_trials: usize,
        interval_ms: u64,
        mut on_event: F,
    ) -> Result<(), PopCodeError>
    where
        F: FnMut(&SessionEvent),
    {
        self.start(num_trials, interval_ms)?;

        while let Some(run) = self.run {
            std::thread::sleep(run.interval);
            if let Some(event) = self.tick() {
                on_event(&event);
            }
        }

        Ok(())
    }
}
