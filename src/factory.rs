//! Construction of generators and dataset trees from resolved configurations.
//!
//! The descriptor layer owns all string-to-object resolution; what arrives
//! here is an already-typed configuration (generator kind plus numeric
//! parameters, weighted dataset shapes). Named well-known sequences resolve
//! through an explicit [`SequenceRegistry`] passed in by the caller; the core
//! holds no process-global state.

use crate::dataset::{AtomicDataset, CompositeDataset, Dataset};
use crate::distribution::Exponential;
use crate::generators::{
    ConstantGenerator, DistributionSampler, FloatRangeGenerator, IntRangeGenerator,
};
use crate::sequence::{Fibonacci, Padovan, Recurrence, RecurrenceGenerator};
use datasynth_core::{GeneratorContext, GeneratorError, ValueGenerator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Boxed generator producing `f64` values.
pub type NumberGenerator = Box<dyn ValueGenerator<Value = f64>>;

/// Boxed generator producing `i64` sequence terms.
pub type SequenceGenerator = Box<dyn ValueGenerator<Value = i64>>;

/// Error type for configuration parsing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Resolved sequence parameters: inclusive bounds and uniqueness policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceParams {
    /// Inclusive lower bound.
    #[serde(default)]
    pub min: i64,

    /// Inclusive upper bound; absent leaves the sequence unbounded above.
    #[serde(default)]
    pub max: Option<i64>,

    /// Suppress the leading duplicate seed values.
    #[serde(default)]
    pub unique: bool,
}

/// Resolved generator configuration: kind plus numeric parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// The same value on every call.
    Constant {
        /// The value to produce.
        value: f64,
    },

    /// Uniform random integers in `[min, max]`.
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Uniform random floats in `[min, max]`.
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Exponentially distributed values with the given rate.
    Exponential {
        /// Rate parameter, > 0.
        rate: f64,
    },

    /// A registered recurrence sequence, resolved by name.
    Sequence {
        /// Registry name, e.g. `"fibonacci"`.
        name: String,
        #[serde(flatten)]
        params: SequenceParams,
    },
}

/// Resolved dataset tree configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetConfig {
    /// Leaf wrapping one generator configuration.
    Atomic {
        /// Dataset name, unique among its parent's immediate children.
        name: String,
        /// Generator backing this leaf.
        generator: GeneratorConfig,
    },

    /// Weighted union of weighted child configurations.
    Composite {
        /// Dataset name.
        name: String,
        /// Children in attachment order.
        children: Vec<SubDatasetConfig>,
    },
}

/// One weighted child of a composite dataset configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDatasetConfig {
    /// The child dataset.
    #[serde(flatten)]
    pub dataset: DatasetConfig,

    /// Relative weight of this child.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl DatasetConfig {
    /// Parse a dataset tree configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Constructor for a registered sequence.
type SequenceConstructor = Box<dyn Fn(&SequenceParams) -> Result<SequenceGenerator, GeneratorError>>;

/// Explicit registry of named recurrence sequences.
///
/// Passed into the factory by the descriptor layer; replaces any notion of a
/// process-wide sequence table. [`SequenceRegistry::default`] carries the
/// built-in sequences.
pub struct SequenceRegistry {
    entries: HashMap<String, SequenceConstructor>,
}

impl SequenceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in sequences `"fibonacci"` and
    /// `"padovan"`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("fibonacci", |params| build_sequence(Fibonacci, params));
        registry.register("padovan", |params| build_sequence(Padovan, params));
        registry
    }

    /// Register a named sequence constructor, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&SequenceParams) -> Result<SequenceGenerator, GeneratorError> + 'static,
    {
        self.entries.insert(name.into(), Box::new(constructor));
    }

    /// Construct the named sequence with the given parameters.
    ///
    /// # Errors
    /// `UnknownSequence` when the name is not registered.
    pub fn create(
        &self,
        name: &str,
        params: &SequenceParams,
    ) -> Result<SequenceGenerator, GeneratorError> {
        match self.entries.get(name) {
            Some(constructor) => constructor(params),
            None => Err(GeneratorError::UnknownSequence(name.to_string())),
        }
    }

    /// Registered sequence names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn build_sequence<R>(recurrence: R, params: &SequenceParams) -> Result<SequenceGenerator, GeneratorError>
where
    R: Recurrence<Term = i64> + 'static,
{
    let mut generator = RecurrenceGenerator::new(recurrence, params.min, params.max)?;
    if params.unique {
        generator = generator.with_unique_filtering();
    }
    Ok(Box::new(generator))
}

/// Adapts an integer-valued generator to the `f64` value domain, so integer
/// sequences and ranges slot into number dataset trees.
struct FloatAdapter {
    inner: SequenceGenerator,
}

impl ValueGenerator for FloatAdapter {
    type Value = f64;

    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.inner.init(ctx)
    }

    fn generate(&mut self) -> Result<Option<f64>, GeneratorError> {
        Ok(self.inner.generate()?.map(|value| value as f64))
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.inner.reset()
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn thread_safe(&self) -> bool {
        self.inner.thread_safe()
    }

    fn parallelizable(&self) -> bool {
        self.inner.parallelizable()
    }
}

/// Build a number generator from a resolved configuration.
///
/// # Errors
/// Propagates construction validation errors and unknown-sequence lookups.
pub fn build_number_generator(
    config: &GeneratorConfig,
    registry: &SequenceRegistry,
) -> Result<NumberGenerator, GeneratorError> {
    debug!(?config, "building number generator");
    match config {
        GeneratorConfig::Constant { value } => Ok(Box::new(ConstantGenerator::new(*value))),
        GeneratorConfig::IntRange { min, max } => Ok(Box::new(FloatAdapter {
            inner: Box::new(IntRangeGenerator::new(*min, *max)?),
        })),
        GeneratorConfig::FloatRange { min, max } => {
            Ok(Box::new(FloatRangeGenerator::new(*min, *max)?))
        }
        GeneratorConfig::Exponential { rate } => Ok(Box::new(DistributionSampler::new(
            Exponential::new(*rate)?,
        ))),
        GeneratorConfig::Sequence { name, params } => Ok(Box::new(FloatAdapter {
            inner: registry.create(name, params)?,
        })),
    }
}

/// Build a dataset tree from a resolved configuration, bottom-up.
///
/// # Errors
/// Propagates generator construction errors and attach-time validation
/// (negative weights, duplicate sibling names).
pub fn build_dataset(
    config: &DatasetConfig,
    registry: &SequenceRegistry,
) -> Result<Dataset<f64>, GeneratorError> {
    match config {
        DatasetConfig::Atomic { name, generator } => {
            let generator = build_number_generator(generator, registry)?;
            Ok(Dataset::Atomic(AtomicDataset::new(name.clone(), generator)))
        }
        DatasetConfig::Composite { name, children } => {
            debug!(dataset = %name, children = children.len(), "building composite dataset");
            let mut composite = CompositeDataset::new(name.clone());
            for child in children {
                let dataset = build_dataset(&child.dataset, registry)?;
                composite.add_sub_dataset(dataset, child.weight)?;
            }
            Ok(Dataset::Composite(composite))
        }
    }
}
