//! Sequence state: the values being sorted and their render bounds.

use rand::Rng;

use crate::error::{Error, Result};

/// A single value in the sequence.
pub type Value = i64;

/// Minimum and maximum over the current sequence.
///
/// Used purely to scale bars when rendering; sorting never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Value,
    pub max: Value,
}

impl Bounds {
    /// Compute bounds over a slice. An empty slice yields `0..0`.
    pub fn of(values: &[Value]) -> Self {
        let mut iter = values.iter().copied();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self { min, max }
    }

    /// Distance between min and max, never zero.
    #[inline]
    pub fn span(&self) -> Value {
        (self.max - self.min).max(1)
    }
}

/// The mutable sequence owned by a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    values: Vec<Value>,
    bounds: Bounds,
}

impl Sequence {
    /// Create a sequence from explicit values.
    pub fn from_values(values: Vec<Value>) -> Self {
        let bounds = Bounds::of(&values);
        Self { values, bounds }
    }

    /// Install a new sequence, recomputing bounds.
    pub fn replace(&mut self, values: Vec<Value>) {
        self.bounds = Bounds::of(&values);
        self.values = values;
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the value at `index`. Panics when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Value {
        self.values[index]
    }

    /// Overwrite the value at `index`. Panics when out of range.
    #[inline]
    pub fn set(&mut self, index: usize, value: Value) {
        self.values[index] = value;
    }

    /// Swap two positions. Panics when either is out of range.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    /// Bounds as of the last replacement.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Borrow the values for rendering.
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}

/// Draw `len` values from `min..=max`, rejecting degenerate requests.
pub fn random_values<R: Rng>(
    len: usize,
    min: Value,
    max: Value,
    rng: &mut R,
) -> Result<Vec<Value>> {
    if len == 0 {
        return Err(Error::Configuration("sequence length must be positive".into()));
    }
    if min > max {
        return Err(Error::Configuration(format!(
            "min value {min} exceeds max value {max}"
        )));
    }
    Ok((0..len).map(|_| rng.gen_range(min..=max)).collect())
}
