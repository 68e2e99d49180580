//! Contract between the run controller and whatever draws the sequence.

use crate::model::Frame;
use std::collections::BTreeSet;

/// Presentation adapter. Implementations must not mutate their inputs.
pub trait Presenter {
    fn render(&mut self, values: &[i32], active: &BTreeSet<usize>, settled: &BTreeSet<usize>);
    fn update_counters(&mut self, comparisons: u64, swaps: u64);
}

impl Frame {
    /// Hand this frame to a presenter: redraw first, then counters.
    pub fn present<P: Presenter + ?Sized>(&self, p: &mut P) {
        p.render(&self.values, &self.active, &self.settled);
        p.update_counters(self.counters.comparisons, self.counters.swaps);
    }
}
