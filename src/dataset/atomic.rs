//! Atomic dataset leaves.

use datasynth_core::{GeneratorContext, GeneratorError, GeneratorState, ValueGenerator};
use tracing::debug;

/// Leaf dataset wrapping exactly one concrete generator.
///
/// Sampling an atomic dataset always delegates to the owned generator, so
/// the leaf's value distribution is whatever the generator produces.
pub struct AtomicDataset<T: 'static> {
    name: String,
    generator: Box<dyn ValueGenerator<Value = T>>,
    state: GeneratorState,
}

impl<T: 'static> AtomicDataset<T> {
    /// Create a named leaf around `generator`.
    pub fn new(name: impl Into<String>, generator: Box<dyn ValueGenerator<Value = T>>) -> Self {
        Self {
            name: name.into(),
            generator,
            state: GeneratorState::Created,
        }
    }

    /// Name of this leaf.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn generate_for_dataset(&mut self, name: &str) -> Result<Option<T>, GeneratorError> {
        if name == self.name {
            self.generate()
        } else {
            Err(GeneratorError::DatasetNotFound(name.to_string()))
        }
    }
}

impl<T: 'static> ValueGenerator for AtomicDataset<T> {
    type Value = T;

    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.state.enter_ready(&self.name)?;
        debug!(dataset = %self.name, "initializing atomic dataset");
        self.generator.init(&ctx.scoped(&self.name))
    }

    fn generate(&mut self) -> Result<Option<T>, GeneratorError> {
        self.state.require_ready(&self.name)?;
        self.generator.generate()
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.state.require_ready(&self.name)?;
        self.generator.reset()
    }

    fn close(&mut self) {
        if self.state == GeneratorState::Closed {
            return;
        }
        debug!(dataset = %self.name, "closing atomic dataset");
        self.generator.close();
        self.state = GeneratorState::Closed;
    }

    fn thread_safe(&self) -> bool {
        self.generator.thread_safe()
    }

    fn parallelizable(&self) -> bool {
        self.generator.parallelizable()
    }
}
