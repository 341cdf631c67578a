//! Error types for the generation core.

use thiserror::Error;

/// Errors that can occur while configuring or driving generators.
///
/// Exhaustion of a bounded generator is deliberately *not* represented here;
/// it is a normal terminal state reported as `Ok(None)` by
/// [`ValueGenerator::generate`](crate::ValueGenerator::generate).
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Construction parameter outside the valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Named dataset lookup failed.
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    /// Sequence name is not present in the registry.
    #[error("Unknown sequence: {0}")]
    UnknownSequence(String),

    /// Generator driven while not ready (init never called, or already closed).
    #[error("Generator '{0}' is not ready (init not called or already closed)")]
    NotInitialized(String),

    /// `init` called on an already-initialized generator.
    #[error("Generator '{0}' already initialized")]
    AlreadyInitialized(String),

    /// Composite dataset sampled with no selectable children.
    #[error("Dataset '{0}' has no selectable children")]
    EmptyDataset(String),
}
