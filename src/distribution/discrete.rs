//! Discrete weight function backed by a fixed weight table.

use super::WeightFunction;

/// Weight function over the integer coordinates `0..len`.
///
/// `value(x)` truncates `x` toward zero and looks the result up in the
/// table. Coordinates outside `[0, len - 1]` are a caller contract violation.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedWeightFunction {
    weights: Vec<f64>,
}

impl IndexedWeightFunction {
    /// Create from the ordered weight table.
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl WeightFunction for IndexedWeightFunction {
    /// # Panics
    ///
    /// Panics when `x` truncates to an index outside `[0, len - 1]`.
    fn value(&self, x: f64) -> f64 {
        let index = x.trunc();
        assert!(
            index >= 0.0 && (index as usize) < self.weights.len(),
            "weight index {index} out of range 0..{}",
            self.weights.len()
        );
        self.weights[index as usize]
    }
}
