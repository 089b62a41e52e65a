//! Heap sort with every sift swap exposed as its own step.
//!
//! The recursive heap repair is flattened into a [`Sift`] cursor holding the
//! node being repaired and the current heap boundary. A swap moves the cursor
//! down to the child it swapped with and returns, so the next `advance()`
//! resumes the repair exactly where the previous swap left it.

use super::{finished_violation, AlgorithmInfo, SortAlgorithm, StepGenerator};
use crate::error::Result;
use crate::sequence::Sequence;
use crate::step::{Direction, Highlight, Step};

/// Heap sort factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heap;

impl SortAlgorithm for Heap {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Heap Sort",
            key: "heap",
            time_complexity: "O(n log n)",
            space_complexity: "O(1)",
        }
    }

    fn generator(&self, seq: &Sequence, direction: Direction) -> Box<dyn StepGenerator> {
        Box::new(HeapSteps::new(seq.len(), direction))
    }
}

/// A heap repair in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sift {
    node: usize,
    heap_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Building the heap; `next` is the next internal node to repair.
    Build { next: Option<usize> },
    /// Extracting the root; `end` is the last unsorted index.
    Extract { end: usize },
    Done,
}

/// Heap sort progress.
#[derive(Debug, Clone)]
pub struct HeapSteps {
    len: usize,
    direction: Direction,
    phase: Phase,
    sift: Option<Sift>,
}

impl HeapSteps {
    pub fn new(len: usize, direction: Direction) -> Self {
        let phase = if len < 2 {
            Phase::Extract { end: 0 }
        } else {
            Phase::Build {
                next: Some(len / 2 - 1),
            }
        };
        Self {
            len,
            direction,
            phase,
            sift: None,
        }
    }

    /// Child of `node` that should sit above it, if any.
    ///
    /// Ascending builds a max-heap, descending a min-heap.
    fn dominant_child(&self, seq: &Sequence, sift: Sift) -> Option<usize> {
        let mut top = sift.node;
        for child in [2 * sift.node + 1, 2 * sift.node + 2] {
            if child < sift.heap_size && self.direction.out_of_order(seq.get(child), seq.get(top)) {
                top = child;
            }
        }
        (top != sift.node).then_some(top)
    }
}

impl StepGenerator for HeapSteps {
    fn advance(&mut self, seq: &mut Sequence) -> Result<Step> {
        loop {
            if let Some(sift) = self.sift {
                match self.dominant_child(seq, sift) {
                    Some(child) => {
                        seq.swap(sift.node, child);
                        self.sift = Some(Sift {
                            node: child,
                            ..sift
                        });
                        tracing::trace!(node = sift.node, child, heap_size = sift.heap_size, "heap sift");
                        return Ok(Step::Continue(Highlight::pair(sift.node, child)));
                    }
                    None => self.sift = None,
                }
                continue;
            }

            match self.phase {
                Phase::Build { next: Some(node) } => {
                    self.sift = Some(Sift {
                        node,
                        heap_size: self.len,
                    });
                    self.phase = Phase::Build {
                        next: node.checked_sub(1),
                    };
                }
                Phase::Build { next: None } => {
                    self.phase = Phase::Extract { end: self.len - 1 };
                }
                Phase::Extract { end } if end > 0 => {
                    seq.swap(0, end);
                    self.sift = Some(Sift {
                        node: 0,
                        heap_size: end,
                    });
                    self.phase = Phase::Extract { end: end - 1 };
                    tracing::trace!(end, "heap extract");
                    return Ok(Step::Continue(Highlight::pair(end, 0)));
                }
                Phase::Extract { .. } => {
                    self.phase = Phase::Done;
                    return Ok(Step::Finished);
                }
                Phase::Done => return Err(finished_violation("heap")),
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uninterrupted recursive heap sort recording every swap, for comparison.
    fn reference_swaps(values: &mut [i64], direction: Direction) -> Vec<(usize, usize)> {
        fn heapify(
            v: &mut [i64],
            n: usize,
            i: usize,
            d: Direction,
            out: &mut Vec<(usize, usize)>,
        ) {
            let mut top = i;
            for c in [2 * i + 1, 2 * i + 2] {
                if c < n && d.out_of_order(v[c], v[top]) {
                    top = c;
                }
            }
            if top != i {
                v.swap(i, top);
                out.push((i, top));
                heapify(v, n, top, d, out);
            }
        }

        let n = values.len();
        let mut out = Vec::new();
        for i in (0..n / 2).rev() {
            heapify(values, n, i, direction, &mut out);
        }
        for end in (1..n).rev() {
            values.swap(0, end);
            out.push((end, 0));
            heapify(values, end, 0, direction, &mut out);
        }
        out
    }

    #[test]
    fn matches_recursive_swap_order() {
        let input = vec![9, 4, 7, 1, 8, 2, 2, 6, 3, 5, 0];
        for direction in [Direction::Ascending, Direction::Descending] {
            let mut expected_values = input.clone();
            let expected = reference_swaps(&mut expected_values, direction);

            let mut seq = Sequence::from_values(input.clone());
            let mut gen = Heap.generator(&seq, direction);
            let mut actual = Vec::new();
            while let Step::Continue(h) = gen.advance(&mut seq).unwrap() {
                let idx: Vec<_> = h.iter().map(|(i, _)| i).collect();
                actual.push((idx[0], idx[1]));
            }

            assert_eq!(actual, expected);
            assert_eq!(seq.as_slice(), expected_values.as_slice());
            assert!(direction.is_sorted(seq.as_slice()));
        }
    }

    #[test]
    fn two_elements() {
        let mut seq = Sequence::from_values(vec![1, 2]);
        let mut gen = Heap.generator(&seq, Direction::Ascending);
        // Build: 2 rises to root. Extract: root swaps to the end.
        assert_eq!(
            gen.advance(&mut seq).unwrap(),
            Step::Continue(Highlight::pair(0, 1))
        );
        assert_eq!(
            gen.advance(&mut seq).unwrap(),
            Step::Continue(Highlight::pair(1, 0))
        );
        assert_eq!(seq.as_slice(), &[1, 2]);
        assert_eq!(gen.advance(&mut seq).unwrap(), Step::Finished);
        assert!(gen.is_finished());
    }

    #[test]
    fn deep_sift_survives_interruption() {
        // Advance one step at a time, cloning the generator between steps;
        // the clone must carry on identically.
        let mut seq = Sequence::from_values((0..31).collect());
        let mut gen = HeapSteps::new(seq.len(), Direction::Ascending);
        loop {
            let mut resumed = gen.clone();
            let mut shadow = seq.clone();
            let a = gen.advance(&mut seq).unwrap();
            let b = resumed.advance(&mut shadow).unwrap();
            assert_eq!(a, b);
            assert_eq!(seq, shadow);
            if a.is_finished() {
                break;
            }
        }
        assert!(Direction::Ascending.is_sorted(seq.as_slice()));
    }
}
