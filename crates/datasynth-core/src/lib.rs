//! Core contract for the datasynth generation engine.
//!
//! This crate provides the foundational pieces every value generator in the
//! engine builds on:
//!
//! - [`ValueGenerator`] - The generic generator capability (init/generate/reset/close)
//! - [`GeneratorContext`] - Seed material passed down the init cascade
//! - [`GeneratorState`] - Lifecycle state shared by stateful generators
//! - [`GeneratorError`] - Error taxonomy for construction, lookup and state misuse
//!
//! # Architecture
//!
//! The datasynth-core crate sits at the foundation of the engine:
//!
//! ```text
//! datasynth-core (this crate)
//!    │
//!    └─── datasynth  (distributions, sequences, dataset trees, factory)
//! ```
//!
//! Everything above it depends only on the capability contract, never on
//! concrete generator types, so composition layers (such as the weighted
//! dataset tree) can wrap arbitrary generators uniformly.

pub mod error;
pub mod generator;

// Re-exports for convenience
pub use error::GeneratorError;
pub use generator::{GeneratorContext, GeneratorState, ValueGenerator};
