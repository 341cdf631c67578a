//! The generic value-generator capability contract.

use crate::error::GeneratorError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Multiplier used to spread scope hashes across the seed space.
///
/// 2^64 divided by the golden ratio; consecutive salts land far apart.
const SEED_MIX: u64 = 0x9E3779B97F4A7C15;

/// Lifecycle state shared by stateful generators.
///
/// ```text
/// Created ──(init)──► Ready ──(close)──► Closed
/// ```
///
/// Exhaustion of a bounded generator is not a lifecycle state; an exhausted
/// generator stays `Ready` and reports unavailability until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Constructed but not yet initialized.
    Created,
    /// Initialized and able to produce values.
    Ready,
    /// Closed; owned resources released.
    Closed,
}

impl GeneratorState {
    /// Transition `Created -> Ready`, rejecting repeated init.
    pub fn enter_ready(&mut self, what: &str) -> Result<(), GeneratorError> {
        if *self != GeneratorState::Created {
            return Err(GeneratorError::AlreadyInitialized(what.to_string()));
        }
        *self = GeneratorState::Ready;
        Ok(())
    }

    /// Guard operations that need a live, initialized generator.
    pub fn require_ready(&self, what: &str) -> Result<(), GeneratorError> {
        if *self != GeneratorState::Ready {
            return Err(GeneratorError::NotInitialized(what.to_string()));
        }
        Ok(())
    }
}

/// Context passed down the `init` cascade.
///
/// Carries the base seed from which every stateful generator derives its own
/// random stream. Two runs with the same base seed and the same tree shape
/// produce identical output; sibling scopes derive decorrelated streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContext {
    /// Base seed for this scope.
    seed: u64,
}

impl GeneratorContext {
    /// Create a context with the given base seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// The base seed of this scope.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a reproducible seed for a named scope.
    pub fn seed_for(&self, scope: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        scope.hash(&mut hasher);
        self.seed.wrapping_add(hasher.finish().wrapping_mul(SEED_MIX))
    }

    /// Create a seeded RNG for a named scope.
    pub fn rng_for(&self, scope: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed_for(scope))
    }

    /// Narrow the context to a named scope, deriving a new base seed.
    ///
    /// Composite generators pass a scoped context to each child so that
    /// identically-configured leaves in different branches draw independent
    /// streams.
    pub fn scoped(&self, scope: &str) -> GeneratorContext {
        GeneratorContext::new(self.seed_for(scope))
    }
}

impl Default for GeneratorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Capability contract implemented by every value generator.
///
/// Implementations are driven through a fixed lifecycle: [`init`] exactly once
/// before any other call, any number of [`generate`]/[`reset`] calls, then
/// [`close`]. A bounded generator that has produced its last value reports
/// unavailability with `Ok(None)`; that is an expected terminal state, not an
/// error, and `reset` returns the generator to the state it was in right
/// after `init`.
///
/// Instances are not thread-safe unless they say so: the capability flags let
/// an outer scheduler decide whether an instance may be shared across worker
/// threads or must be cloned per worker. No locking happens internally.
///
/// [`init`]: ValueGenerator::init
/// [`generate`]: ValueGenerator::generate
/// [`reset`]: ValueGenerator::reset
/// [`close`]: ValueGenerator::close
pub trait ValueGenerator {
    /// Type of the produced values.
    type Value;

    /// Prepare the generator for use, deriving any owned random streams from
    /// the context. Must be called exactly once; a second call fails with
    /// [`GeneratorError::AlreadyInitialized`].
    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError>;

    /// Produce the next value, or `Ok(None)` once the generator is exhausted.
    fn generate(&mut self) -> Result<Option<Self::Value>, GeneratorError>;

    /// Return the generator to the state it was in right after `init`.
    fn reset(&mut self) -> Result<(), GeneratorError>;

    /// Release owned resources. Idempotent; a closed generator rejects
    /// further `generate`/`reset` calls.
    fn close(&mut self);

    /// Whether one instance may be shared across threads without external
    /// synchronization.
    fn thread_safe(&self) -> bool {
        false
    }

    /// Whether independent clones of this generator may run on separate
    /// workers. Implies the output carries no cross-instance ordering
    /// guarantee beyond the construction parameters.
    fn parallelizable(&self) -> bool {
        false
    }
}
