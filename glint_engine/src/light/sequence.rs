use crate::core::types::Number;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A cyclic source of jitter offsets in `0..1`.
///
/// Area lights perturb their sample grid through one of these. The default is
/// the constant `0.5` (sample cell centres); tests substitute a fixed cycle
/// to make soft shadows deterministic.
#[derive(Debug)]
pub struct Sequence {
    values: Vec<Number>,
    cursor: AtomicUsize,
}

impl Sequence {
    /// # Panics
    /// `values` must not be empty.
    pub fn new(values: impl Into<Vec<Number>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "a jitter sequence needs at least one value");
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn constant(value: Number) -> Self { Self::new([value]) }

    /// The next value in the cycle
    pub fn next(&self) -> Number {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[idx % self.values.len()]
    }
}

impl Default for Sequence {
    fn default() -> Self { Self::constant(0.5) }
}

impl Clone for Sequence {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            cursor: AtomicUsize::new(self.cursor.load(Ordering::Relaxed)),
        }
    }
}
