//! Weighted, hierarchical dataset selection.
//!
//! A dataset tree picks, on each call, one value consistent with a weighted
//! hierarchy of named alternatives. Leaves ([`AtomicDataset`]) wrap exactly
//! one concrete generator; interior nodes ([`CompositeDataset`]) select among
//! weighted children in attachment order, recursively. Selection at each
//! level is local, so the net probability of a leaf is the product of the
//! local probabilities along its path.
//!
//! Trees are built bottom-up, initialized once through the root, and closed
//! symmetrically:
//!
//! ```text
//! construct leaves ─► attach to composites ─► init(ctx) ─► generate()* ─► close()
//! ```
//!
//! Names are unique among one composite's immediate children only; distinct
//! branches may reuse a name without collision.

mod atomic;
mod composite;

pub use atomic::AtomicDataset;
pub use composite::CompositeDataset;

use datasynth_core::{GeneratorContext, GeneratorError, ValueGenerator};

/// A node of the dataset tree: a leaf generator or a weighted union.
pub enum Dataset<T: 'static> {
    /// Leaf wrapping one concrete generator.
    Atomic(AtomicDataset<T>),
    /// Weighted union of named child datasets.
    Composite(CompositeDataset<T>),
}

impl<T: 'static> Dataset<T> {
    /// Name of this node, unique among its parent's immediate children.
    pub fn name(&self) -> &str {
        match self {
            Dataset::Atomic(node) => node.name(),
            Dataset::Composite(node) => node.name(),
        }
    }

    /// Generate a value as if sampling specifically from the named dataset.
    ///
    /// The node's own name short-circuits to its `generate`; otherwise the
    /// immediate children are searched by name (no deep resolution) and the
    /// match generates with its own internal weighting.
    ///
    /// # Errors
    /// `DatasetNotFound` when neither this node nor an immediate child
    /// carries `name`.
    pub fn generate_for_dataset(&mut self, name: &str) -> Result<Option<T>, GeneratorError> {
        match self {
            Dataset::Atomic(node) => node.generate_for_dataset(name),
            Dataset::Composite(node) => node.generate_for_dataset(name),
        }
    }

    /// All atomic leaves reachable from this node, for validation and
    /// tooling; not part of the sampling hot path.
    pub fn all_atomic_subsets(&self) -> Vec<&AtomicDataset<T>> {
        match self {
            Dataset::Atomic(node) => vec![node],
            Dataset::Composite(node) => node.all_atomic_subsets(),
        }
    }
}

impl<T: 'static> ValueGenerator for Dataset<T> {
    type Value = T;

    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        match self {
            Dataset::Atomic(node) => node.init(ctx),
            Dataset::Composite(node) => node.init(ctx),
        }
    }

    fn generate(&mut self) -> Result<Option<T>, GeneratorError> {
        match self {
            Dataset::Atomic(node) => node.generate(),
            Dataset::Composite(node) => node.generate(),
        }
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        match self {
            Dataset::Atomic(node) => node.reset(),
            Dataset::Composite(node) => node.reset(),
        }
    }

    fn close(&mut self) {
        match self {
            Dataset::Atomic(node) => node.close(),
            Dataset::Composite(node) => node.close(),
        }
    }

    fn thread_safe(&self) -> bool {
        match self {
            Dataset::Atomic(node) => node.thread_safe(),
            Dataset::Composite(node) => node.thread_safe(),
        }
    }

    fn parallelizable(&self) -> bool {
        match self {
            Dataset::Atomic(node) => node.parallelizable(),
            Dataset::Composite(node) => node.parallelizable(),
        }
    }
}
