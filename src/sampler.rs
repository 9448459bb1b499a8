//! Poisson spike sampling.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::PopCodeError;

/// Draw a Poisson-distributed spike count with expected value `lambda`.
///
/// Knuth's multiplication method: multiply independent uniform(0, 1) draws
/// until the running product falls below `exp(-lambda)`; the count is the
/// number of multiplications minus one. The function returns an error for a
/// negative or non-finite `lambda`, and `lambda == 0` deterministically
/// yields 0.
pub fn poisson<R: Rng>(lambda: f64, rng: &mut R) -> Result<u64, PopCodeError> {
    if lambda < 0.0 || !lambda.is_finite() {
        return Err(PopCodeError::InvalidRate(lambda));
    }

    if lambda == 0.0 {
        return Ok(0);
    }

    let threshold = (-lambda).exp();
    let uniform = Uniform::new(0.0, 1.0);

    let mut count = 0;
    let mut product: f64 = uniform.sample(rng);
    while product >= threshold {
        product *= uniform.sample(rng);
        count += 1;
    }

    Ok(count)
}

/// Sample a spike count for every neuron from its expected rate.
///
/// The counts are returned in the same order as the rates. The function
/// returns an error as soon as one rate is negative or non-finite.
pub fn sample_response<R: Rng>(rates: &[f64], rng: &mut R) -> Result<Vec<u64>, PopCodeError> {
    rates.iter().map(|&rate| poisson(rate, rng)).collect()
}
