//! Bubble sort, one adjacent swap per step.

use super::{finished_violation, AlgorithmInfo, SortAlgorithm, StepGenerator};
use crate::error::Result;
use crate::sequence::Sequence;
use crate::step::{Direction, Highlight, Step};

/// Bubble sort factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bubble;

impl SortAlgorithm for Bubble {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Bubble Sort",
            key: "bubble",
            time_complexity: "O(n^2)",
            space_complexity: "O(1)",
        }
    }

    fn generator(&self, seq: &Sequence, direction: Direction) -> Box<dyn StepGenerator> {
        Box::new(BubbleSteps::new(seq.len(), direction))
    }
}

/// Bubble sort progress: `pass` completed passes, `cursor` the next pair.
#[derive(Debug, Clone)]
pub struct BubbleSteps {
    len: usize,
    direction: Direction,
    pass: usize,
    cursor: usize,
    finished: bool,
}

impl BubbleSteps {
    pub fn new(len: usize, direction: Direction) -> Self {
        Self {
            len,
            direction,
            pass: 0,
            cursor: 0,
            finished: false,
        }
    }
}

impl StepGenerator for BubbleSteps {
    fn advance(&mut self, seq: &mut Sequence) -> Result<Step> {
        if self.finished {
            return Err(finished_violation("bubble"));
        }

        // Pairs that are already ordered are skipped without yielding.
        while self.pass + 1 < self.len {
            let end = self.len - 1 - self.pass;
            if self.cursor >= end {
                self.pass += 1;
                self.cursor = 0;
                continue;
            }

            let j = self.cursor;
            self.cursor += 1;
            if self.direction.out_of_order(seq.get(j), seq.get(j + 1)) {
                seq.swap(j, j + 1);
                tracing::trace!(pass = self.pass, j, "bubble swap");
                return Ok(Step::Continue(Highlight::pair(j, j + 1)));
            }
        }

        self.finished = true;
        Ok(Step::Finished)
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
