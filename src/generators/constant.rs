//! Constant value generator.

use datasynth_core::{GeneratorContext, GeneratorError, GeneratorState, ValueGenerator};

/// Generator that yields the same value on every call.
#[derive(Debug, Clone)]
pub struct ConstantGenerator<T: Clone> {
    value: T,
    state: GeneratorState,
}

impl<T: Clone> ConstantGenerator<T> {
    /// Create a generator that always produces `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            state: GeneratorState::Created,
        }
    }
}

impl<T: Clone> ValueGenerator for ConstantGenerator<T> {
    type Value = T;

    fn init(&mut self, _ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.state.enter_ready("constant generator")
    }

    fn generate(&mut self) -> Result<Option<T>, GeneratorError> {
        self.state.require_ready("constant generator")?;
        Ok(Some(self.value.clone()))
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.state.require_ready("constant generator")
    }

    fn close(&mut self) {
        self.state = GeneratorState::Closed;
    }

    fn thread_safe(&self) -> bool {
        // No mutable generation state.
        true
    }

    fn parallelizable(&self) -> bool {
        true
    }
}
