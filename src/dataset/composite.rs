//! Composite dataset nodes.

use super::{AtomicDataset, Dataset};
use crate::distribution::weighted_index;
use datasynth_core::{GeneratorContext, GeneratorError, GeneratorState, ValueGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// One weighted child entry of a composite dataset.
struct SubDataset<T: 'static> {
    dataset: Dataset<T>,
    weight: f64,
}

/// Weighted union of named child datasets.
///
/// Weights are relative; no normalization is required, and a child with
/// weight 0 is legal but never selected. Each `generate` draws `u` in
/// `[0, W)` where `W` is the cached total child weight, walks the children
/// in attachment order accumulating weight, and recurses into the selected
/// child. Attachment order is preserved for enumeration but carries no
/// sampling semantics.
pub struct CompositeDataset<T: 'static> {
    name: String,
    children: Vec<SubDataset<T>>,
    /// Sum of child weights; maintained on attach so sampling never re-sums.
    total_weight: f64,
    seed: Option<u64>,
    rng: Option<StdRng>,
    state: GeneratorState,
}

impl<T: 'static> CompositeDataset<T> {
    /// Create an empty composite with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            total_weight: 0.0,
            seed: None,
            rng: None,
            state: GeneratorState::Created,
        }
    }

    /// Name of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a child dataset with a relative weight.
    ///
    /// # Errors
    /// `InvalidArgument` when the weight is negative or not finite, or when
    /// the child's name duplicates an existing immediate child.
    /// `AlreadyInitialized` when called after `init`; children attach during
    /// bottom-up construction only.
    pub fn add_sub_dataset(&mut self, child: Dataset<T>, weight: f64) -> Result<(), GeneratorError> {
        if self.state != GeneratorState::Created {
            return Err(GeneratorError::AlreadyInitialized(self.name.clone()));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GeneratorError::InvalidArgument(format!(
                "weight of dataset '{}' must be finite and >= 0, got {weight}",
                child.name()
            )));
        }
        if self.children.iter().any(|c| c.dataset.name() == child.name()) {
            return Err(GeneratorError::InvalidArgument(format!(
                "duplicate dataset name '{}' under '{}'",
                child.name(),
                self.name
            )));
        }
        self.total_weight += weight;
        self.children.push(SubDataset {
            dataset: child,
            weight,
        });
        Ok(())
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether this composite has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total selectable mass (sum of child weights).
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Immediate children in attachment order, with their weights.
    pub fn sub_datasets(&self) -> impl Iterator<Item = (&Dataset<T>, f64)> + '_ {
        self.children.iter().map(|c| (&c.dataset, c.weight))
    }

    pub(crate) fn generate_for_dataset(&mut self, name: &str) -> Result<Option<T>, GeneratorError> {
        if name == self.name {
            return self.generate();
        }
        self.state.require_ready(&self.name)?;
        match self.children.iter_mut().find(|c| c.dataset.name() == name) {
            Some(child) => child.dataset.generate(),
            None => Err(GeneratorError::DatasetNotFound(name.to_string())),
        }
    }

    pub(crate) fn all_atomic_subsets(&self) -> Vec<&AtomicDataset<T>> {
        let mut leaves = Vec::new();
        for child in &self.children {
            leaves.extend(child.dataset.all_atomic_subsets());
        }
        leaves
    }
}

impl<T: 'static> ValueGenerator for CompositeDataset<T> {
    type Value = T;

    fn init(&mut self, ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.state.enter_ready(&self.name)?;
        debug!(
            dataset = %self.name,
            children = self.children.len(),
            "initializing composite dataset"
        );
        let scoped = ctx.scoped(&self.name);
        self.seed = Some(scoped.seed());
        self.rng = Some(StdRng::seed_from_u64(scoped.seed()));
        for child in &mut self.children {
            child.dataset.init(&scoped)?;
        }
        Ok(())
    }

    fn generate(&mut self) -> Result<Option<T>, GeneratorError> {
        self.state.require_ready(&self.name)?;
        if self.children.is_empty() || self.total_weight <= 0.0 {
            return Err(GeneratorError::EmptyDataset(self.name.clone()));
        }
        let Some(rng) = self.rng.as_mut() else {
            return Err(GeneratorError::NotInitialized(self.name.clone()));
        };
        let selected = weighted_index(rng, self.total_weight, self.children.iter().map(|c| c.weight));
        match selected {
            Some(index) => self.children[index].dataset.generate(),
            None => Err(GeneratorError::EmptyDataset(self.name.clone())),
        }
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.state.require_ready(&self.name)?;
        self.rng = self.seed.map(StdRng::seed_from_u64);
        for child in &mut self.children {
            child.dataset.reset()?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.state == GeneratorState::Closed {
            return;
        }
        debug!(dataset = %self.name, "closing composite dataset");
        for child in &mut self.children {
            child.dataset.close();
        }
        self.rng = None;
        self.state = GeneratorState::Closed;
    }

    fn thread_safe(&self) -> bool {
        self.children.iter().all(|c| c.dataset.thread_safe())
    }

    fn parallelizable(&self) -> bool {
        self.children.iter().all(|c| c.dataset.parallelizable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::ConstantGenerator;

    fn leaf(name: &str, value: f64) -> Dataset<f64> {
        Dataset::Atomic(AtomicDataset::new(name, Box::new(ConstantGenerator::new(value))))
    }

    #[test]
    fn test_empty_composite_fails_sampling() {
        let mut composite: CompositeDataset<f64> = CompositeDataset::new("empty");
        composite.init(&GeneratorContext::new(42)).unwrap();
        assert!(matches!(
            composite.generate(),
            Err(GeneratorError::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_zero_total_weight_fails_sampling() {
        let mut composite = CompositeDataset::new("zeros");
        composite.add_sub_dataset(leaf("one", 1.0), 0.0).unwrap();
        composite.init(&GeneratorContext::new(42)).unwrap();
        assert!(matches!(
            composite.generate(),
            Err(GeneratorError::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_zero_weight_child_never_selected() {
        let mut composite = CompositeDataset::new("pair");
        composite.add_sub_dataset(leaf("never", -1.0), 0.0).unwrap();
        composite.add_sub_dataset(leaf("always", 7.0), 1.0).unwrap();
        composite.init(&GeneratorContext::new(42)).unwrap();

        for _ in 0..200 {
            assert_eq!(composite.generate().unwrap(), Some(7.0));
        }
    }

    #[test]
    fn test_negative_weight_rejected_at_attach() {
        let mut composite = CompositeDataset::new("root");
        assert!(matches!(
            composite.add_sub_dataset(leaf("one", 1.0), -0.5),
            Err(GeneratorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_duplicate_child_name_rejected() {
        let mut composite = CompositeDataset::new("root");
        composite.add_sub_dataset(leaf("one", 1.0), 1.0).unwrap();
        assert!(matches!(
            composite.add_sub_dataset(leaf("one", 2.0), 1.0),
            Err(GeneratorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_attach_after_init_rejected() {
        let mut composite = CompositeDataset::new("root");
        composite.add_sub_dataset(leaf("one", 1.0), 1.0).unwrap();
        composite.init(&GeneratorContext::new(42)).unwrap();
        assert!(matches!(
            composite.add_sub_dataset(leaf("two", 2.0), 1.0),
            Err(GeneratorError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn test_generate_for_dataset_self_match() {
        let mut composite = CompositeDataset::new("root");
        composite.add_sub_dataset(leaf("one", 1.0), 1.0).unwrap();
        composite.init(&GeneratorContext::new(42)).unwrap();
        assert_eq!(composite.generate_for_dataset("root").unwrap(), Some(1.0));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut composite = CompositeDataset::new("root");
        composite.add_sub_dataset(leaf("one", 1.0), 1.0).unwrap();
        composite.init(&GeneratorContext::new(42)).unwrap();
        composite.close();
        composite.close();
    }

    #[test]
    fn test_reset_replays_selection_stream() {
        let mut composite = CompositeDataset::new("root");
        composite.add_sub_dataset(leaf("one", 1.0), 1.0).unwrap();
        composite.add_sub_dataset(leaf("two", 2.0), 1.0).unwrap();
        composite.init(&GeneratorContext::new(42)).unwrap();

        let first: Vec<f64> = (0..20)
            .map(|_| composite.generate().unwrap().unwrap())
            .collect();

        composite.reset().unwrap();
        let replay: Vec<f64> = (0..20)
            .map(|_| composite.generate().unwrap().unwrap())
            .collect();
        assert_eq!(first, replay);
    }
}
