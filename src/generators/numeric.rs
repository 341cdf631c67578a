//! Inclusive-range numeric generators.

use datasynth_core::{GeneratorContext, GeneratorError, GeneratorState, ValueGenerator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random integers in `[min, max]`.
#[derive(Debug, Clone)]
pub struct IntRangeGenerator {
    min: i64,
    max: i64,
    seed: Option<u64>,
    rng: Option<StdRng>,
    state: GeneratorState,
}

impl IntRangeGenerator {
    /// Create a generator for the inclusive range `[min, max]`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self, GeneratorError> {
        if min > max {
            return Err(GeneratorError::InvalidArgument(format!(
                "int range requires min <= max, got {min}..={max}"
            )));
        }
        Ok(Self {
            min,
            max,
            seed: None,
            rng: None,
            state: GeneratorState::Created,
        })
    }
}

impl ValueGenerator for IntRangeGenerator {
    type Value = i64;

    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.state.enter_ready("int range generator")?;
        let seed = ctx.seed_for("int_range");
        self.seed = Some(seed);
        self.rng = Some(StdRng::seed_from_u64(seed));
        Ok(())
    }

    fn generate(&mut self) -> Result<Option<i64>, GeneratorError> {
        self.state.require_ready("int range generator")?;
        let Some(rng) = self.rng.as_mut() else {
            return Err(GeneratorError::NotInitialized(
                "int range generator".to_string(),
            ));
        };
        Ok(Some(rng.random_range(self.min..=self.max)))
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.state.require_ready("int range generator")?;
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

/// Uniform random floats in `[min, max]`.
#[derive(Debug, Clone)]
pub struct FloatRangeGenerator {
    min: f64,
    max: f64,
    seed: Option<u64>,
    rng: Option<StdRng>,
    state: GeneratorState,
}

impl FloatRangeGenerator {
    /// Create a generator for the inclusive range `[min, max]`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` unless both bounds are finite and
    /// `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, GeneratorError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(GeneratorError::InvalidArgument(format!(
                "float range requires finite min <= max, got {min}..={max}"
            )));
        }
        Ok(Self {
            min,
            max,
            seed: None,
            rng: None,
            state: GeneratorState::Created,
        })
    }
}

impl ValueGenerator for FloatRangeGenerator {
    type Value = f64;

    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.state.enter_ready("float range generator")?;
        let seed = ctx.seed_for("float_range");
        self.seed = Some(seed);
        self.rng = Some(StdRng::seed_from_u64(seed));
        Ok(())
    }

    fn generate(&mut self) -> Result<Option<f64>, GeneratorError> {
        self.state.require_ready("float range generator")?;
        let Some(rng) = self.rng.as_mut() else {
            return Err(GeneratorError::NotInitialized(
                "float range generator".to_string(),
            ));
        };
        Ok(Some(rng.random_range(self.min..=self.max)))
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.state.require_ready("float range generator")?;
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
