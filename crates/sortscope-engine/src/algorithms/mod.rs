//! Resumable sorting algorithms.
//!
//! Each algorithm is split into a factory ([`SortAlgorithm`]) and a
//! [`StepGenerator`] that owns every loop cursor of one run. A call to
//! [`StepGenerator::advance`] performs exactly one visible mutation and
//! returns, so the caller may pause for any number of ticks between calls
//! without affecting the final order.
//!
//! # Visible steps
//!
//! | Algorithm | One step                                             |
//! |-----------|------------------------------------------------------|
//! | Bubble    | one adjacent swap (in-order comparisons are silent)  |
//! | Insertion | one leftward shift of the element being inserted     |
//! | Selection | one suffix scan followed by one swap (even self-swap)|
//! | Heap      | one swap, at any sift depth or root extraction       |

mod bubble;
mod heap;
mod insertion;
mod selection;

pub use bubble::{Bubble, BubbleSteps};
pub use heap::{Heap, HeapSteps};
pub use insertion::{Insertion, InsertionSteps};
pub use selection::{Selection, SelectionSteps};

use crate::error::{Error, Result};
use crate::sequence::Sequence;
use crate::step::{Direction, Step};

/// Static description of an algorithm, shown alongside the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlgorithmInfo {
    /// Display name, e.g. "Heap Sort"
    pub name: &'static str,
    /// Short lookup key, e.g. "heap"
    pub key: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// A sort expressed as a resumable computation over a [`Sequence`].
pub trait StepGenerator: Send {
    /// Perform the next visible unit of work.
    ///
    /// Returns [`Error::ContractViolation`] if called after `Finished`.
    fn advance(&mut self, seq: &mut Sequence) -> Result<Step>;

    /// Whether `Finished` has already been returned.
    fn is_finished(&self) -> bool;
}

/// Factory for step generators; the unit of registration.
pub trait SortAlgorithm: Send + Sync {
    fn info(&self) -> AlgorithmInfo;

    /// Bind a fresh generator to the current contents of `seq`.
    fn generator(&self, seq: &Sequence, direction: Direction) -> Box<dyn StepGenerator>;
}

pub(crate) fn finished_violation(name: &str) -> Error {
    Error::ContractViolation(format!("{name} generator advanced after it finished"))
}

/// Drive a generator to completion, returning the number of visible steps.
pub fn run_to_end(generator: &mut dyn StepGenerator, seq: &mut Sequence) -> Result<usize> {
    let mut steps = 0;
    while let Step::Continue(_) = generator.advance(seq)? {
        steps += 1;
    }
    Ok(steps)
}

/// The four algorithms bundled with the engine, in menu order.
pub fn builtin() -> Vec<Box<dyn SortAlgorithm>> {
    vec![
        Box::new(Bubble),
        Box::new(Insertion),
        Box::new(Selection),
        Box::new(Heap),
    ]
}
