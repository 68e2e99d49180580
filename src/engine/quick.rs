use super::Stepper;
use crate::model::ProgressEvent;
use std::ops::Range;

/// Quick sort driven by an explicit stack of half-open ranges instead of recursion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickState {
    /// `None` until the first step seeds it with the full range.
    pub pending: Option<Vec<Range<usize>>>,
}

/// Lomuto partition of `values[range]` around its last element; returns the pivot's final index.
fn partition(values: &mut [i32], range: Range<usize>, ev: &mut ProgressEvent) -> usize {
    let last = range.end - 1;
    let pivot = values[last];
    let mut p = range.start;
    for i in range.start..last {
        ev.comparisons_delta += 1;
        if values[i] < pivot {
            values.swap(i, p);
            p += 1;
            ev.swaps_delta += 1;
        }
    }
    values.swap(p, last);
    ev.swaps_delta += 1;
    p
}

impl Stepper for QuickState {
    fn step(&mut self, values: &mut Vec<i32>) -> ProgressEvent {
        let len = values.len();
        let stack = self.pending.get_or_insert_with(|| vec![0..len]);
        let Some(range) = stack.pop() else {
            return ProgressEvent::default();
        };

        let mut ev = ProgressEvent {
            settled: range.clone().collect(),
            ..Default::default()
        };
        if range.len() < 2 {
            return ev;
        }

        let p = partition(values, range.clone(), &mut ev);
        // Left is pushed first so the right side is popped first.
        stack.push(range.start..p);
        stack.push(p + 1..range.end);
        ev.active.insert(p);
        ev
    }

    fn is_finished(&self, _len: usize) -> bool {
        self.pending.as_ref().is_some_and(Vec::is_empty)
    }
}
