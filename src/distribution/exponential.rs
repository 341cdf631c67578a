//! Exponential distribution for inverse-transform sampling.

use super::CumulativeDistribution;
use datasynth_core::GeneratorError;

/// Exponential distribution with rate `a > 0`.
///
/// `F(x) = 1 - exp(-a * x)`, `F_inverse(p) = -ln(1 - p) / a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    /// Create an exponential distribution with the given rate.
    ///
    /// # Errors
    /// Returns `InvalidArgument` unless `rate` is finite and strictly
    /// positive.
    pub fn new(rate: f64) -> Result<Self, GeneratorError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(GeneratorError::InvalidArgument(format!(
                "Exponential rate must be > 0, got {rate}"
            )));
        }
        Ok(Self { rate })
    }

    /// Rate parameter.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl CumulativeDistribution for Exponential {
    fn cumulative_probability(&self, x: f64) -> f64 {
        1.0 - (-self.rate * x).exp()
    }

    fn inverse(&self, p: f64) -> f64 {
        -(1.0 - p).ln() / self.rate
    }
}
