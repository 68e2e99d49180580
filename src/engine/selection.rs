use super::Stepper;
use crate::model::ProgressEvent;

/// Selection sort: prefix `[0, i)` is final, `j` scans `[i, n)` for the minimum.
///
/// `j == 0` means the next step opens a new pass (a live scan cursor is always `> i`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub i: usize,
    pub j: usize,
    pub min_idx: usize,
}

impl Stepper for SelectionState {
    fn step(&mut self, values: &mut Vec<i32>) -> ProgressEvent {
        let len = values.len();
        if self.j == 0 {
            self.min_idx = self.i;
            self.j = self.i + 1;
        }

        if self.j < len {
            if values[self.j] < values[self.min_idx] {
                self.min_idx = self.j;
            }
            let ev = ProgressEvent {
                active: [self.j, self.min_idx].into_iter().collect(),
                settled: (0..self.i).collect(),
                comparisons_delta: 1,
                ..Default::default()
            };
            self.j += 1;
            ev
        } else {
            let mut ev = ProgressEvent {
                active: [self.i, self.min_idx].into_iter().collect(),
                settled: (0..=self.i).collect(),
                ..Default::default()
            };
            if self.min_idx != self.i {
                values.swap(self.i, self.min_idx);
                ev.swaps_delta = 1;
            }
            self.i += 1;
            self.j = 0;
            ev
        }
    }

    fn is_finished(&self, len: usize) -> bool {
        self.i >= len
    }
}
