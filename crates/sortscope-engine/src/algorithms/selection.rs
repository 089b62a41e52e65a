//! Selection sort, one scan-and-swap per step.

use super::{finished_violation, AlgorithmInfo, SortAlgorithm, StepGenerator};
use crate::error::Result;
use crate::sequence::Sequence;
use crate::step::{Direction, Highlight, Step};

/// Selection sort factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection;

impl SortAlgorithm for Selection {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Selection Sort",
            key: "selection",
            time_complexity: "O(n^2)",
            space_complexity: "O(1)",
        }
    }

    fn generator(&self, seq: &Sequence, direction: Direction) -> Box<dyn StepGenerator> {
        Box::new(SelectionSteps::new(seq.len(), direction))
    }
}

/// Selection sort progress: `position` is the slot being filled.
#[derive(Debug, Clone)]
pub struct SelectionSteps {
    len: usize,
    direction: Direction,
    position: usize,
    finished: bool,
}

impl SelectionSteps {
    pub fn new(len: usize, direction: Direction) -> Self {
        Self {
            len,
            direction,
            position: 0,
            finished: false,
        }
    }

    /// Index of the first extremum in `seq[from..]` for this direction.
    fn extremum(&self, seq: &Sequence, from: usize) -> usize {
        (from + 1..self.len).fold(from, |best, j| {
            if self.direction.out_of_order(seq.get(best), seq.get(j)) {
                j
            } else {
                best
            }
        })
    }
}

impl StepGenerator for SelectionSteps {
    fn advance(&mut self, seq: &mut Sequence) -> Result<Step> {
        if self.finished {
            return Err(finished_violation("selection"));
        }
        if self.len < 2 || self.position >= self.len {
            self.finished = true;
            return Ok(Step::Finished);
        }

        let i = self.position;
        let found = self.extremum(seq, i);
        // Self-swaps are kept so every position gets a visible step.
        seq.swap(i, found);
        self.position += 1;
        tracing::trace!(i, found, "selection swap");
        Ok(Step::Continue(Highlight::pair(i, found)))
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_ordered_descending_still_highlights() {
        let mut seq = Sequence::from_values(vec![4, 2, 2, 1]);
        let mut gen = Selection.generator(&seq, Direction::Descending);

        let Step::Continue(first) = gen.advance(&mut seq).unwrap() else {
            panic!("expected a step at position 0");
        };
        assert!(first.contains(0));
        assert_eq!(seq.as_slice(), &[4, 2, 2, 1]);

        let mut steps = 1;
        while let Step::Continue(_) = gen.advance(&mut seq).unwrap() {
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(seq.as_slice(), &[4, 2, 2, 1]);
    }

    #[test]
    fn one_step_per_position() {
        let mut seq = Sequence::from_values(vec![3, 1, 2]);
        let mut gen = Selection.generator(&seq, Direction::Ascending);

        assert_eq!(
            gen.advance(&mut seq).unwrap(),
            Step::Continue(Highlight::pair(0, 1))
        );
        assert_eq!(seq.as_slice(), &[1, 3, 2]);
        assert_eq!(
            gen.advance(&mut seq).unwrap(),
            Step::Continue(Highlight::pair(1, 2))
        );
        assert_eq!(seq.as_slice(), &[1, 2, 3]);
        assert_eq!(
            gen.advance(&mut seq).unwrap(),
            Step::Continue(Highlight::pair(2, 2))
        );
        assert_eq!(gen.advance(&mut seq).unwrap(), Step::Finished);
    }

    #[test]
    fn ties_pick_first_occurrence() {
        let seq = Sequence::from_values(vec![5, 1, 1, 3]);
        let gen = SelectionSteps::new(seq.len(), Direction::Ascending);
        assert_eq!(gen.extremum(&seq, 0), 1);
    }
}
