//! Inverse-transform sampler over a cumulative distribution.

use crate::distribution::CumulativeDistribution;
use datasynth_core::{GeneratorContext, GeneratorError, GeneratorState, ValueGenerator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws values from any [`CumulativeDistribution`] by inverse-transform
/// sampling: `u` uniform in `[0, 1)` mapped through the inverse CDF.
#[derive(Debug, Clone)]
pub struct DistributionSampler<D: CumulativeDistribution> {
    distribution: D,
    seed: Option<u64>,
    rng: Option<StdRng>,
    state: GeneratorState,
}

impl<D: CumulativeDistribution> DistributionSampler<D> {
    /// Create a sampler over `distribution`.
    pub fn new(distribution: D) -> Self {
        Self {
            distribution,
            seed: None,
            rng: None,
            state: GeneratorState::Created,
        }
    }

    /// The wrapped distribution.
    pub fn distribution(&self) -> &D {
        &self.distribution
    }
}

impl<D: CumulativeDistribution> ValueGenerator for DistributionSampler<D> {
    type Value = f64;

    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.state.enter_ready("distribution sampler")?;
        let seed = ctx.seed_for("distribution_sampler");
        self.seed = Some(seed);
        self.rng = Some(StdRng::seed_from_u64(seed));
        Ok(())
    }

    fn generate(&mut self) -> Result<Option<f64>, GeneratorError> {
        self.state.require_ready("distribution sampler")?;
        let Some(rng) = self.rng.as_mut() else {
            return Err(GeneratorError::NotInitialized(
                "distribution sampler".to_string(),
            ));
        };
        let u = rng.random::<f64>();
        Ok(Some(self.distribution.inverse(u)))
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.state.require_ready("distribution sampler")?;
        self.rng = self.seed.map(StdRng::seed_from_u64);
        Ok(())
    }

    fn close(&mut self) {
        self.rng = None;
        self.state = GeneratorState::Closed;
    }

    fn parallelizable(&self) -> bool {
        true
    }
}
