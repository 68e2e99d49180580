use super::Stepper;
use crate::model::ProgressEvent;

/// Bubble sort as a two-index state machine.
///
/// `i` counts the settled elements at the tail, `j` is the inner cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BubbleState {
    pub i: usize,
    pub j: usize,
}

impl BubbleState {
    fn settled_tail(&self, len: usize) -> impl Iterator<Item = usize> {
        (len - self.i)..len
    }
}

impl Stepper for BubbleState {
    fn step(&mut self, values: &mut Vec<i32>) -> ProgressEvent {
        let len = values.len();
        if self.j + self.i + 1 < len {
            let j = self.j;
            let mut ev = ProgressEvent {
                active: [j, j + 1].into_iter().collect(),
                settled: self.settled_tail(len).collect(),
                comparisons_delta: 1,
                ..Default::default()
            };
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                ev.swaps_delta = 1;
            }
            self.j += 1;
            ev
        } else {
            // Pass boundary: no comparison, but still reported so the settled tail grows.
            self.j = 0;
            self.i += 1;
            ProgressEvent {
                settled: self.settled_tail(len).collect(),
                ..Default::default()
            }
        }
    }

    fn is_finished(&self, len: usize) -> bool {
        self.i >= len
    }
}
