//! Probability distributions and weight functions.
//!
//! Two pure, stateless contracts bias random sampling:
//!
//! - [`WeightFunction`] scores a coordinate with a relative weight, used for
//!   discrete weighted selection.
//! - [`CumulativeDistribution`] pairs a CDF with its inverse, used for
//!   inverse-transform sampling of continuous values.
//!
//! All computation is `f64`; NaN and infinity propagate naturally. Because
//! implementations hold no mutable state they are safe to share read-only
//! across any number of concurrent samplers.

mod discrete;
mod exponential;
mod gaussian;

pub use discrete::IndexedWeightFunction;
pub use exponential::Exponential;
pub use gaussian::GaussianWeightFunction;

use rand::{Rng, RngCore};

/// Non-negative scoring function used to bias discrete selection.
pub trait WeightFunction {
    /// Relative weight of `x`.
    ///
    /// Weights must be >= 0 for every `x` in the function's intended domain;
    /// that is a caller obligation and is not checked per call.
    fn value(&self, x: f64) -> f64;
}

/// Monotonic mapping from a value to the probability mass at or below it,
/// paired with an inverse for sampling.
pub trait CumulativeDistribution {
    /// Probability mass at or below `x`, in `[0, 1]` and non-decreasing.
    fn cumulative_probability(&self, x: f64) -> f64;

    /// Value whose cumulative probability is `p`.
    ///
    /// Callers must draw `p` from `[0, 1)`; `p = 1` is outside the allowed
    /// range for distributions with unbounded support.
    fn inverse(&self, p: f64) -> f64;

    /// Draw one value by inverse-transform sampling: `u` uniform in `[0, 1)`
    /// mapped through [`inverse`](CumulativeDistribution::inverse).
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        self.inverse(rng.random::<f64>())
    }
}

/// Select an index from a sequence of relative weights.
///
/// Draws `u` uniformly in `[0, total)` and walks the weights in order,
/// accumulating until the running sum exceeds `u`. Entries with weight <= 0
/// are never selected. Returns `None` when `total` is not positive.
///
/// `total` must be the sum of `weights`; callers typically cache it instead
/// of re-summing per draw.
pub fn weighted_index<R, I>(rng: &mut R, total: f64, weights: I) -> Option<usize>
where
    R: Rng + ?Sized,
    I: Iterator<Item = f64>,
{
    if total <= 0.0 || total.is_nan() {
        return None;
    }
    let u = rng.random_range(0.0..total);
    let mut acc = 0.0;
    let mut last_selectable = None;
    for (index, weight) in weights.enumerate() {
        if weight <= 0.0 {
            continue;
        }
        acc += weight;
        last_selectable = Some(index);
        if u < acc {
            return Some(index);
        }
    }
    // Rounding in the accumulation can leave u >= acc at the end of the walk.
    last_selectable
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_weighted_index_respects_ratios() {
        let mut rng = StdRng::seed_from_u64(42);
        let weights = [1.0, 2.0];
        let total = 3.0;

        let mut counts = [0usize; 2];
        for _ in 0..3000 {
            let index = weighted_index(&mut rng, total, weights.iter().copied()).unwrap();
            counts[index] += 1;
        }

        let share = counts[1] as f64 / 3000.0;
        assert!(
            (share - 2.0 / 3.0).abs() < 0.05,
            "heavy entry share: {share}"
        );
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let index = weighted_index(&mut rng, 1.0, [0.0, 1.0, 0.0].iter().copied()).unwrap();
            assert_eq!(index, 1);
        }
    }

    #[test]
    fn test_weighted_index_zero_mass() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(weighted_index(&mut rng, 0.0, [0.0, 0.0].iter().copied()), None);
        assert_eq!(weighted_index(&mut rng, -1.0, std::iter::empty()), None);
    }

    #[test]
    fn test_sample_uses_inverse_transform() {
        let distribution = Exponential::new(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let value = distribution.sample(&mut rng);
            assert!(value >= 0.0 && value.is_finite());
        }
    }
}
