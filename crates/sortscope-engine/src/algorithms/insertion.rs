//! Insertion sort, one leftward shift per step.

use super::{finished_violation, AlgorithmInfo, SortAlgorithm, StepGenerator};
use crate::error::Result;
use crate::sequence::Sequence;
use crate::step::{Direction, Highlight, Step};

/// Insertion sort factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Insertion;

impl SortAlgorithm for Insertion {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Insertion Sort",
            key: "insertion",
            time_complexity: "O(n^2)",
            space_complexity: "O(1)",
        }
    }

    fn generator(&self, seq: &Sequence, direction: Direction) -> Box<dyn StepGenerator> {
        Box::new(InsertionSteps::new(seq.len(), direction))
    }
}

/// Insertion sort progress.
///
/// `next` is the index of the next unsorted element; `hole` is where the
/// element currently being inserted sits.
#[derive(Debug, Clone)]
pub struct InsertionSteps {
    len: usize,
    direction: Direction,
    next: usize,
    hole: usize,
    finished: bool,
}

impl InsertionSteps {
    pub fn new(len: usize, direction: Direction) -> Self {
        Self {
            len,
            direction,
            next: 1,
            hole: 1,
            finished: false,
        }
    }
}

impl StepGenerator for InsertionSteps {
    fn advance(&mut self, seq: &mut Sequence) -> Result<Step> {
        if self.finished {
            return Err(finished_violation("insertion"));
        }

        while self.next < self.len {
            let k = self.hole;
            if k > 0 && self.direction.out_of_order(seq.get(k - 1), seq.get(k)) {
                seq.swap(k - 1, k);
                self.hole -= 1;
                tracing::trace!(inserting = self.next, at = k - 1, "insertion shift");
                return Ok(Step::Continue(Highlight::pair(k - 1, k)));
            }

            // Element is in place; move on without a visible step.
            self.next += 1;
            self.hole = self.next;
        }

        self.finished = true;
        Ok(Step::Finished)
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_are_individual_steps() {
        let mut seq = Sequence::from_values(vec![3, 4, 1]);
        let mut gen = Insertion.generator(&seq, Direction::Ascending);

        // 4 is already after 3: no step. 1 shifts twice.
        assert_eq!(
            gen.advance(&mut seq).unwrap(),
            Step::Continue(Highlight::pair(1, 2))
        );
        assert_eq!(seq.as_slice(), &[3, 1, 4]);
        assert_eq!(
            gen.advance(&mut seq).unwrap(),
            Step::Continue(Highlight::pair(0, 1))
        );
        assert_eq!(seq.as_slice(), &[1, 3, 4]);
        assert_eq!(gen.advance(&mut seq).unwrap(), Step::Finished);
    }

    #[test]
    fn equal_values_do_not_shift() {
        let mut seq = Sequence::from_values(vec![2, 2, 2]);
        let mut gen = Insertion.generator(&seq, Direction::Descending);
        assert_eq!(gen.advance(&mut seq).unwrap(), Step::Finished);
    }

    #[test]
    fn descending_insertion() {
        let mut seq = Sequence::from_values(vec![1, 5, 3, 4]);
        let mut gen = Insertion.generator(&seq, Direction::Descending);
        let steps = super::super::run_to_end(gen.as_mut(), &mut seq).unwrap();
        assert_eq!(seq.as_slice(), &[5, 4, 3, 1]);
        // 5 passes 1; 3 passes 1; 4 passes 1 and 3
        assert_eq!(steps, 4);
    }
}
