//! Gaussian bell-curve weight function.

use super::WeightFunction;
use datasynth_core::GeneratorError;

/// Bell-curve weight `scale * exp(-0.5 * ((x - average) / deviation)^2)`
/// with `scale = 1 / (deviation * sqrt(2 * pi))`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianWeightFunction {
    average: f64,
    deviation: f64,
    scale: f64,
}

impl GaussianWeightFunction {
    /// Create a Gaussian weight function centered on `average`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `deviation` is zero; the scale factor
    /// would divide by zero.
    pub fn new(average: f64, deviation: f64) -> Result<Self, GeneratorError> {
        if deviation == 0.0 {
            return Err(GeneratorError::InvalidArgument(format!(
                "Gaussian deviation must be non-zero, got {deviation}"
            )));
        }
        let scale = 1.0 / (deviation * (2.0 * std::f64::consts::PI).sqrt());
        Ok(Self {
            average,
            deviation,
            scale,
        })
    }

    /// Center of the bell curve.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Standard deviation of the bell curve.
    pub fn deviation(&self) -> f64 {
        self.deviation
    }
}

impl WeightFunction for GaussianWeightFunction {
    fn value(&self, x: f64) -> f64 {
        let z = (x - self.average) / self.deviation;
        self.scale * (-0.5 * z * z).exp()
    }
}
