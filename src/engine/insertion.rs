use super::Stepper;
use crate::model::ProgressEvent;

/// Insertion sort over a growing sorted prefix `[0, i)`.
///
/// While `key` is held, `hole` is the slot the key would land in if the scan stopped now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionState {
    pub i: usize,
    pub hole: usize,
    pub key: Option<i32>,
}

impl Stepper for InsertionState {
    fn step(&mut self, values: &mut Vec<i32>) -> ProgressEvent {
        let key = match self.key {
            Some(k) => k,
            None => {
                // Picking up the key is not a comparison of its own.
                let k = values[self.i];
                self.key = Some(k);
                self.hole = self.i;
                k
            }
        };

        let prefix = 0..self.i;
        if self.hole > 0 && values[self.hole - 1] > key {
            let h = self.hole;
            values[h] = values[h - 1];
            self.hole -= 1;
            ProgressEvent {
                active: [h - 1, h].into_iter().collect(),
                settled: prefix.collect(),
                swaps_delta: 1,
                ..Default::default()
            }
        } else {
            values[self.hole] = key;
            self.key = None;
            self.i += 1;
            ProgressEvent {
                active: [self.i - 1].into_iter().collect(),
                settled: (0..self.i).collect(),
                comparisons_delta: 1,
                ..Default::default()
            }
        }
    }

    fn is_finished(&self, len: usize) -> bool {
        self.i >= len && self.key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_then_places_key() {
        let mut values = vec![3, 1, 2];
        let mut state = InsertionState::default();

        // i = 0: key 3 placed at once.
        let ev = state.step(&mut values);
        assert_eq!((ev.comparisons_delta, ev.swaps_delta), (1, 0));
        assert_eq!(state.i, 1);

        // i = 1: key 1, shift 3 right.
        let ev = state.step(&mut values);
        assert_eq!(values, vec![3, 3, 2]);
        assert_eq!(ev.active, [0, 1].into_iter().collect());
        assert_eq!(ev.swaps_delta, 1);
        assert_eq!(state.key, Some(1));

        let ev = state.step(&mut values);
        assert_eq!(values, vec![1, 3, 2]);
        // The boundary of the grown prefix is highlighted, not the landing slot.
        assert_eq!(ev.active, [1].into_iter().collect());
        assert_eq!(ev.comparisons_delta, 1);
        assert_eq!(state.key, None);
        assert_eq!(state.i, 2);
    }

    #[test]
    fn counts_one_comparison_per_element() {
        let mut values = vec![5, 4, 3, 2, 1];
        let mut state = InsertionState::default();
        let (mut cmp, mut swp) = (0, 0);
        while !state.is_finished(values.len()) {
            let ev = state.step(&mut values);
            cmp += ev.comparisons_delta;
            swp += ev.swaps_delta;
        }
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(cmp, 5);
        // Reverse order: every pair is an inversion.
        assert_eq!(swp, 10);
    }
}
