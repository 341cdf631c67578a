//! Stochastic value generation core for synthetic test data.
//!
//! This crate decides *which value is produced next* and *with what
//! probability or ordering*, independent of where the value is eventually
//! written. It never performs I/O; connectors, descriptor parsing and
//! consumer chains live outside and talk to this core through the
//! [`ValueGenerator`] contract and the resolved configurations in [`factory`].
//!
//! # Architecture
//!
//! ```text
//! datasynth-core          ValueGenerator contract, context, errors
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │ datasynth (this crate)                       │
//! │                                              │
//! │  distribution   weight functions, CDFs       │
//! │  sequence       recurrence generators        │
//! │  generators     constant / range / sampler   │
//! │  dataset        weighted dataset tree        │
//! │  factory        resolved configs + registry  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! Build a weighted tree by hand, initialize it once through the root, and
//! sample:
//!
//! ```rust
//! use datasynth::dataset::{AtomicDataset, CompositeDataset, Dataset};
//! use datasynth::generators::ConstantGenerator;
//! use datasynth::{GeneratorContext, GeneratorError, ValueGenerator};
//!
//! fn main() -> Result<(), GeneratorError> {
//!     let mut numbers = CompositeDataset::new("numbers");
//!     numbers.add_sub_dataset(
//!         Dataset::Atomic(AtomicDataset::new("one", Box::new(ConstantGenerator::new(1.0)))),
//!         1.0,
//!     )?;
//!     numbers.add_sub_dataset(
//!         Dataset::Atomic(AtomicDataset::new("two", Box::new(ConstantGenerator::new(2.0)))),
//!         2.0,
//!     )?;
//!
//!     let mut tree = Dataset::Composite(numbers);
//!     tree.init(&GeneratorContext::new(42))?;
//!
//!     let value = tree.generate()?.unwrap();
//!     assert!(value == 1.0 || value == 2.0);
//!
//!     tree.close();
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod distribution;
pub mod factory;
pub mod generators;
pub mod sequence;

// Re-exports for convenience
pub use datasynth_core::{GeneratorContext, GeneratorError, GeneratorState, ValueGenerator};
