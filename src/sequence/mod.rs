//! Recurrence-relation sequence generators.
//!
//! A recurrence of order `k` defines every term from the `k` terms before
//! it. [`RecurrenceGenerator`] drives a [`Recurrence`] through the generic
//! generator contract, clipping terms to an inclusive `[min, max]` range and
//! optionally suppressing the duplicate seed values well-known sequences
//! share (see [`RecurrenceGenerator::with_unique_filtering`]).

mod recurrences;

pub use recurrences::{Fibonacci, Padovan};

use datasynth_core::{GeneratorContext, GeneratorError, GeneratorState, ValueGenerator};

/// Sliding window over the last `k` produced terms.
///
/// Fixed-capacity ring buffer; `prev(1)` is the most recently produced term
/// and `prev(k)` the oldest one still held.
#[derive(Debug, Clone)]
pub struct RecurrenceWindow<T> {
    order: usize,
    terms: Vec<T>,
    /// Slot the next push writes to; equals `terms.len()` until full.
    write_index: usize,
}

impl<T: Copy> RecurrenceWindow<T> {
    fn with_order(order: usize) -> Self {
        Self {
            order,
            terms: Vec::with_capacity(order),
            write_index: 0,
        }
    }

    /// Number of terms currently held, at most the order.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been produced yet.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The term produced `offset` pushes ago; `prev(1)` is the latest.
    ///
    /// # Panics
    ///
    /// Panics when `offset` is outside `[1, k]` or references a term that
    /// has not been produced yet.
    pub fn prev(&self, offset: usize) -> T {
        assert!(
            (1..=self.order).contains(&offset),
            "recurrence offset {offset} outside window of order {}",
            self.order
        );
        assert!(
            offset <= self.terms.len(),
            "recurrence offset {offset} references a term not yet produced"
        );
        self.terms[(self.write_index + self.order - offset) % self.order]
    }

    fn push(&mut self, term: T) {
        if self.terms.len() < self.order {
            self.terms.push(term);
        } else {
            self.terms[self.write_index] = term;
        }
        self.write_index = (self.write_index + 1) % self.order;
    }

    fn clear(&mut self) {
        self.terms.clear();
        self.write_index = 0;
    }
}

/// A recurrence relation of fixed order `k`.
pub trait Recurrence {
    /// Term type produced by the relation.
    type Term: Copy + PartialOrd;

    /// Number of prior terms each step references (`k`, at least 1).
    fn order(&self) -> usize;

    /// The `n`-th base case, for `n` in `[0, order - 1]`.
    fn base(&self, n: usize) -> Self::Term;

    /// The next term, computed from the window via `window.prev(1..=k)`.
    fn step(&self, window: &RecurrenceWindow<Self::Term>) -> Self::Term;
}

/// Drives a [`Recurrence`] through the generator contract.
///
/// Terms below `min` or above `max` (when a `max` is configured) are not
/// produced; instead the generator becomes exhausted and reports
/// unavailability until `reset`. Instances are not thread-safe; clone per
/// worker or synchronize externally.
#[derive(Clone)]
pub struct RecurrenceGenerator<R: Recurrence> {
    recurrence: R,
    window: RecurrenceWindow<R::Term>,
    /// Index of the next term to produce.
    index: usize,
    min: R::Term,
    max: Option<R::Term>,
    unique_filtering: bool,
    seed_skip: Option<usize>,
    state: GeneratorState,
    exhausted: bool,
}

impl<R: Recurrence> RecurrenceGenerator<R> {
    /// Create a generator for `recurrence`, bounded to `[min, max]`
    /// (`max = None` leaves the sequence unbounded above).
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a zero-order recurrence.
    pub fn new(recurrence: R, min: R::Term, max: Option<R::Term>) -> Result<Self, GeneratorError> {
        if recurrence.order() == 0 {
            return Err(GeneratorError::InvalidArgument(
                "recurrence order must be at least 1".to_string(),
            ));
        }
        let window = RecurrenceWindow::with_order(recurrence.order());
        Ok(Self {
            recurrence,
            window,
            index: 0,
            min,
            max,
            unique_filtering: false,
            seed_skip: None,
            state: GeneratorState::Created,
            exhausted: false,
        })
    }

    /// Discard the leading duplicate seed values on every reset, so callers
    /// never observe the terms every instance of the same recurrence family
    /// would emit first (e.g. the two leading `1`s of Fibonacci and Padovan
    /// variants).
    pub fn with_unique_filtering(mut self) -> Self {
        self.unique_filtering = true;
        self
    }

    /// Override how many produced values a unique-filtering reset discards.
    ///
    /// Defaults to `order - 1`, which matches the seed overlap of the
    /// well-known sequences but is a heuristic, not a law; arbitrary
    /// recurrences may need a different skip.
    pub fn with_seed_skip(mut self, skip: usize) -> Self {
        self.seed_skip = Some(skip);
        self
    }

    /// Compute and record the next term, or mark the generator exhausted
    /// when the term leaves `[min, max]`.
    fn next_term(&mut self) -> Option<R::Term> {
        let term = if self.index < self.recurrence.order() {
            self.recurrence.base(self.index)
        } else {
            self.recurrence.step(&self.window)
        };
        if term < self.min || self.max.is_some_and(|max| term > max) {
            self.exhausted = true;
            return None;
        }
        self.window.push(term);
        self.index += 1;
        Some(term)
    }

    /// Restore the initial state, replaying the unique-filtering skip.
    fn replay(&mut self) {
        self.window.clear();
        self.index = 0;
        self.exhausted = false;
        if self.unique_filtering {
            let skip = self.seed_skip.unwrap_or(self.recurrence.order() - 1);
            for _ in 0..skip {
                if self.next_term().is_none() {
                    break;
                }
            }
        }
    }
}

impl<R: Recurrence> ValueGenerator for RecurrenceGenerator<R> {
    type Value = R::Term;

    fn init(&mut self, _ctx: &GeneratorContext) -> Result<(), GeneratorError> {
        self.state.enter_ready("recurrence generator")?;
        self.replay();
        Ok(())
    }

    fn generate(&mut self) -> Result<Option<Self::Value>, GeneratorError> {
        self.state.require_ready("recurrence generator")?;
        if self.exhausted {
            return Ok(None);
        }
        Ok(self.next_term())
    }

    fn reset(&mut self) -> Result<(), GeneratorError> {
        self.state.require_ready("recurrence generator")?;
        self.replay();
        Ok(())
    }

    fn close(&mut self) {
        self.state = GeneratorState::Closed;
    }

    fn parallelizable(&self) -> bool {
        // The sequence is fully determined by the construction parameters,
        // so independent clones emit identical streams.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready<R: Recurrence>(generator: &mut RecurrenceGenerator<R>) {
        generator.init(&GeneratorContext::default()).unwrap();
    }

    fn drain<R: Recurrence>(generator: &mut RecurrenceGenerator<R>) -> Vec<R::Term> {
        let mut values = Vec::new();
        while let Some(value) = generator.generate().unwrap() {
            values.push(value);
        }
        values
    }

    #[test]
    fn test_fibonacci_bounded_sequence() {
        let mut generator = RecurrenceGenerator::new(Fibonacci, 0, Some(5)).unwrap();
        ready(&mut generator);
        assert_eq!(drain(&mut generator), vec![0, 1, 1, 2, 3, 5]);
        // Exhaustion is terminal until reset.
        assert_eq!(generator.generate().unwrap(), None);
        assert_eq!(generator.generate().unwrap(), None);
    }

    #[test]
    fn test_padovan_bounded_sequence() {
        let mut generator = RecurrenceGenerator::new(Padovan, 0, Some(10)).unwrap();
        ready(&mut generator);
        assert_eq!(drain(&mut generator), vec![1, 1, 1, 2, 2, 3, 4, 5, 7, 9]);
    }

    #[test]
    fn test_padovan_unique_filtering_skips_seed_duplicates() {
        let mut generator = RecurrenceGenerator::new(Padovan, 0, Some(10))
            .unwrap()
            .with_unique_filtering();
        ready(&mut generator);
        assert_eq!(drain(&mut generator), vec![1, 2, 2, 3, 4, 5, 7, 9]);
    }

    #[test]
    fn test_seed_skip_override() {
        let mut generator = RecurrenceGenerator::new(Padovan, 0, Some(10))
            .unwrap()
            .with_unique_filtering()
            .with_seed_skip(3);
        ready(&mut generator);
        assert_eq!(drain(&mut generator), vec![2, 2, 3, 4, 5, 7, 9]);
    }

    #[test]
    fn test_reset_replays_from_start() {
        let mut generator = RecurrenceGenerator::new(Fibonacci, 0, Some(5)).unwrap();
        ready(&mut generator);
        assert_eq!(drain(&mut generator), vec![0, 1, 1, 2, 3, 5]);

        generator.reset().unwrap();
        assert_eq!(drain(&mut generator), vec![0, 1, 1, 2, 3, 5]);
    }

    #[test]
    fn test_unbounded_sequence_keeps_producing() {
        let mut generator = RecurrenceGenerator::new(Fibonacci, 0, None).unwrap();
        ready(&mut generator);
        let mut last = 0;
        for _ in 0..40 {
            last = generator.generate().unwrap().unwrap();
        }
        assert_eq!(last, 63_245_986);
    }

    #[test]
    fn test_generate_before_init_fails_fast() {
        let mut generator = RecurrenceGenerator::new(Fibonacci, 0, None).unwrap();
        assert!(matches!(
            generator.generate(),
            Err(GeneratorError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_generate_after_close_fails_fast() {
        let mut generator = RecurrenceGenerator::new(Fibonacci, 0, None).unwrap();
        ready(&mut generator);
        generator.close();
        assert!(matches!(
            generator.generate(),
            Err(GeneratorError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_zero_order_recurrence_rejected() {
        struct Degenerate;
        impl Recurrence for Degenerate {
            type Term = i64;
            fn order(&self) -> usize {
                0
            }
            fn base(&self, _n: usize) -> i64 {
                0
            }
            fn step(&self, _window: &RecurrenceWindow<i64>) -> i64 {
                0
            }
        }
        assert!(matches!(
            RecurrenceGenerator::new(Degenerate, 0, None),
            Err(GeneratorError::InvalidArgument(_))
        ));
    }

    #[test]
    #[should_panic(expected = "outside window")]
    fn test_window_offset_out_of_order_panics() {
        let mut window = RecurrenceWindow::with_order(2);
        window.push(1i64);
        window.push(2i64);
        window.prev(3);
    }

    #[test]
    fn test_window_relative_lookup() {
        let mut window = RecurrenceWindow::with_order(3);
        window.push(10i64);
        window.push(20i64);
        window.push(30i64);
        assert_eq!(window.prev(1), 30);
        assert_eq!(window.prev(2), 20);
        assert_eq!(window.prev(3), 10);

        // Oldest term rotates out.
        window.push(40i64);
        assert_eq!(window.prev(1), 40);
        assert_eq!(window.prev(3), 20);
    }
}
