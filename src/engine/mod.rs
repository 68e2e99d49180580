//! Resumable sorting state machines.
//!
//! Every algorithm performs one unit of visible work per [`Stepper::step`] call and
//! reports it as a [`ProgressEvent`]. The controller owns one [`AlgorithmState`] at a time
//! and recreates it on every reset boundary.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::BubbleState;
pub use insertion::InsertionState;
pub use merge::{plan_merges, MergeState, MergeStep};
pub use quick::QuickState;
pub use selection::SelectionState;

use crate::model::{AlgorithmKind, ProgressEvent};

/// One resumable algorithm.
pub trait Stepper {
    /// Advance by one unit of work. Only called while [`Stepper::is_finished`] is false.
    fn step(&mut self, values: &mut Vec<i32>) -> ProgressEvent;

    /// True once no further work remains for a sequence of length `len`.
    fn is_finished(&self, len: usize) -> bool;
}

/// Tagged per-algorithm state; exactly one is active at a time.
#[derive(Debug, Clone)]
pub enum AlgorithmState {
    Bubble(BubbleState),
    Insertion(InsertionState),
    Selection(SelectionState),
    Merge(MergeState),
    Quick(QuickState),
}

impl AlgorithmState {
    /// Fresh "not started" state for `kind`.
    pub fn new(kind: AlgorithmKind) -> Self {
        match kind {
            AlgorithmKind::Bubble => Self::Bubble(BubbleState::default()),
            AlgorithmKind::Insertion => Self::Insertion(InsertionState::default()),
            AlgorithmKind::Selection => Self::Selection(SelectionState::default()),
            AlgorithmKind::Merge => Self::Merge(MergeState::default()),
            AlgorithmKind::Quick => Self::Quick(QuickState::default()),
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Bubble(_) => AlgorithmKind::Bubble,
            Self::Insertion(_) => AlgorithmKind::Insertion,
            Self::Selection(_) => AlgorithmKind::Selection,
            Self::Merge(_) => AlgorithmKind::Merge,
            Self::Quick(_) => AlgorithmKind::Quick,
        }
    }

    fn stepper(&self) -> &dyn Stepper {
        match self {
            Self::Bubble(s) => s,
            Self::Insertion(s) => s,
            Self::Selection(s) => s,
            Self::Merge(s) => s,
            Self::Quick(s) => s,
        }
    }

    fn stepper_mut(&mut self) -> &mut dyn Stepper {
        match self {
            Self::Bubble(s) => s,
            Self::Insertion(s) => s,
            Self::Selection(s) => s,
            Self::Merge(s) => s,
            Self::Quick(s) => s,
        }
    }

    pub fn is_finished(&self, len: usize) -> bool {
        self.stepper().is_finished(len)
    }

    /// Advance one unit of work.
    ///
    /// Once finished this is a no-op that re-reports `done` with zero deltas. Any event
    /// carrying `done` has every index settled.
    pub fn step(&mut self, values: &mut Vec<i32>) -> ProgressEvent {
        let len = values.len();
        if self.is_finished(len) {
            return ProgressEvent::finished(len);
        }
        let mut ev = self.stepper_mut().step(values);
        ev.done = self.is_finished(len);
        if ev.done {
            ev.settled = (0..len).collect();
        }
        ev
    }
}
