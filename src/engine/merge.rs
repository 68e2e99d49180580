use super::Stepper;
use crate::model::ProgressEvent;
use std::collections::VecDeque;

/// Result of one merge in the precomputed plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStep<T> {
    /// Whole sequence right after this merge.
    pub snapshot: Vec<T>,
    /// Merged range, inclusive on both ends.
    pub start: usize,
    pub end: usize,
    pub comparisons: u64,
    /// Elements taken from the right half while the left half still had elements.
    pub swaps: u64,
}

/// Merge sort replayed from a plan built on the first step after a reset.
#[derive(Debug, Clone, Default)]
pub struct MergeState {
    pub pending: Option<VecDeque<MergeStep<i32>>>,
}

/// Run the full top-down merge sort on a copy of `values`, recording every merge in order.
///
/// Ties take from the left half, so the sort is stable.
pub fn plan_merges<T: Ord + Clone>(values: &[T]) -> VecDeque<MergeStep<T>> {
    let mut work = values.to_vec();
    let mut steps = VecDeque::new();
    divide(&mut work, 0, values.len(), &mut steps);
    steps
}

fn divide<T: Ord + Clone>(
    work: &mut [T],
    lo: usize,
    hi: usize,
    steps: &mut VecDeque<MergeStep<T>>,
) {
    if hi - lo < 2 {
        return;
    }
    // Left half is `lo..=(lo + hi - 1) / 2`, matching an inclusive midpoint split.
    let split = (lo + hi - 1) / 2 + 1;
    divide(work, lo, split, steps);
    divide(work, split, hi, steps);
    steps.push_back(merge(work, lo, split, hi));
}

fn merge<T: Ord + Clone>(work: &mut [T], lo: usize, split: usize, hi: usize) -> MergeStep<T> {
    let left = work[lo..split].to_vec();
    let right = work[split..hi].to_vec();
    let (mut a, mut b, mut k) = (0, 0, lo);
    let mut comparisons = 0;
    let mut swaps = 0;

    while a < left.len() && b < right.len() {
        comparisons += 1;
        if left[a] <= right[b] {
            work[k] = left[a].clone();
            a += 1;
        } else {
            work[k] = right[b].clone();
            b += 1;
            swaps += 1;
        }
        k += 1;
    }
    for v in left[a..].iter().chain(&right[b..]) {
        work[k] = v.clone();
        k += 1;
    }

    MergeStep {
        snapshot: work.to_vec(),
        start: lo,
        end: hi - 1,
        comparisons,
        swaps,
    }
}

impl Stepper for MergeState {
    fn step(&mut self, values: &mut Vec<i32>) -> ProgressEvent {
        let pending = self.pending.get_or_insert_with(|| {
            let plan = plan_merges(values.as_slice());
            tracing::debug!(merges = plan.len(), "merge plan computed");
            plan
        });
        match pending.pop_front() {
            Some(step) => {
                *values = step.snapshot;
                ProgressEvent {
                    active: [step.start, step.end].into_iter().collect(),
                    settled: (step.start..=step.end).collect(),
                    comparisons_delta: step.comparisons,
                    swaps_delta: step.swaps,
                    done: false,
                }
            }
            None => ProgressEvent::default(),
        }
    }

    fn is_finished(&self, _len: usize) -> bool {
        self.pending.as_ref().is_some_and(VecDeque::is_empty)
    }
}
