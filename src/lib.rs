//! This crate provides tools for simulating population-vector decoding on a
//! ring of tuning-curve neurons.
//!
//! A stimulus angle drives a population of neurons whose expected firing
//! rates follow a circular tuning curve. Each trial draws Poisson spike
//! counts from those rates, decodes the stimulus back out of the spike
//! pattern by vector summation, and accumulates the running mean squared
//! decoding error. A presentation layer consumes the per-trial reports; this
//! crate performs no rendering of its own.
//!
//! # Decoding a spike response
//!
//! ```rust
//! use popcode::decoder::decode;
//! use popcode::ring::NeuronRing;
//!
//! // A ring of 4 neurons with preferred angles 0, PI/2, PI and 3*PI/2
//! let ring = NeuronRing::new(4).unwrap();
//!
//! // All activity at the neuron preferring angle 0
//! let result = decode(&[10, 0, 0, 0], ring.preferred_angles(), 0.0);
//! assert_eq!(result.estimate, Some(0.0));
//! assert_eq!(result.squared_error, 0.0);
//! ```
//!
//! # Running a session
//!
//! ```rust
//! use popcode::config::SimulationConfig;
//! use popcode::session::{EndReason, Session, SessionEvent};
//!
//! // Create a reproducible session with the default Gaussian-tuned ring
//! let mut session = Session::with_seed(SimulationConfig::default(), 42);
//! session.set_stimulus(1.0);
//!
//! // Run 3 trials, one per tick
//! session.start(3, 10).unwrap();
//! for _ in 0..3 {
//!     match session.tick() {
//!         Some(SessionEvent::Trial(report)) => assert_eq!(report.spikes.len(), 8),
//!         other => panic!("Expected a trial event, got {:?}", other),
//!     }
//! }
//!
//! // One tick later the session resets to idle
//! assert_eq!(session.tick(), Some(SessionEvent::Ended(EndReason::Completed)));
//! assert!(!session.is_running());
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod geometry;
pub mod ring;
pub mod sampler;
pub mod session;
pub mod tracker;
pub mod tuning;

/// The default number of neurons in the ring.
pub const DEFAULT_NUM_NEURONS: usize = 8;
/// The default tuning width parameter.
pub const DEFAULT_TUNING_WIDTH: f64 = 0.5;
/// The default peak firing rate.
pub const DEFAULT_PEAK_RATE: f64 = 1.0;
/// The default true stimulus angle.
pub const DEFAULT_STIMULUS: f64 = 0.0;
