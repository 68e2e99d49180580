//! Property tests for the step engine and run controller.
//!
//! Verifies:
//! 1. Stepping any algorithm until done yields the ascending sort of the input
//! 2. Step counts stay within the per-algorithm bound
//! 3. Counters never decrease within a run
//! 4. Stepping after done changes nothing
//! 5. Restoring the original and re-running reproduces the same output and counts

use proptest::prelude::*;
use sortstep::engine::AlgorithmState;
use sortstep::model::AlgorithmKind;
use sortstep::orchestrator::RunController;

fn arb_kind() -> impl Strategy<Value = AlgorithmKind> {
    prop_oneof![
        Just(AlgorithmKind::Bubble),
        Just(AlgorithmKind::Insertion),
        Just(AlgorithmKind::Selection),
        Just(AlgorithmKind::Merge),
        Just(AlgorithmKind::Quick),
    ]
}

fn arb_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1..=100i32, 0..=500)
}

/// Loose upper bound on steps before `done`, including the extra terminal call.
fn step_bound(kind: AlgorithmKind, n: u64) -> u64 {
    match kind {
        // comparisons/shifts plus one boundary per pass
        AlgorithmKind::Bubble | AlgorithmKind::Selection => n * n + n + 1,
        AlgorithmKind::Insertion => n * (n + 1) / 2 + n + 1,
        AlgorithmKind::Merge => n + 1,
        // one partition plus two pushed ranges per element
        AlgorithmKind::Quick => 2 * n + 2,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stepping_to_done_sorts(kind in arb_kind(), input in arb_values()) {
        let mut values = input.clone();
        let mut state = AlgorithmState::new(kind);
        let bound = step_bound(kind, input.len() as u64);
        let mut steps = 0u64;
        loop {
            let ev = state.step(&mut values);
            steps += 1;
            prop_assert!(steps <= bound, "{:?} exceeded {} steps", kind, bound);
            if ev.done {
                break;
            }
        }
        let mut expected = input;
        expected.sort();
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn counters_are_monotonic_and_terminal_is_stable(
        kind in arb_kind(),
        input in prop::collection::vec(-50..=50i32, 1..=60),
    ) {
        let mut ctl = RunController::with_values(kind, input);
        let mut prev = ctl.counters();
        while !ctl.is_done() {
            ctl.step().unwrap();
            let now = ctl.counters();
            prop_assert!(now.comparisons >= prev.comparisons);
            prop_assert!(now.swaps >= prev.swaps);
            prev = now;
        }

        let values = ctl.values().to_vec();
        let steps = ctl.steps();
        for _ in 0..3 {
            let ev = ctl.step().unwrap();
            prop_assert!(ev.done);
            prop_assert_eq!(ev.comparisons_delta + ev.swaps_delta, 0);
        }
        prop_assert_eq!(ctl.values(), values.as_slice());
        prop_assert_eq!(ctl.counters(), prev);
        prop_assert_eq!(ctl.steps(), steps);
    }

    #[test]
    fn restore_reproduces_first_run(kind in arb_kind(), input in prop::collection::vec(1..=100i32, 1..=80)) {
        let mut ctl = RunController::with_values(kind, input);
        while !ctl.is_done() {
            ctl.step().unwrap();
        }
        let first = (ctl.values().to_vec(), ctl.counters(), ctl.steps());

        ctl.restore_original().unwrap();
        prop_assert_eq!(ctl.steps(), 0);
        prop_assert_eq!(ctl.counters().comparisons, 0);
        while !ctl.is_done() {
            ctl.step().unwrap();
        }
        prop_assert_eq!((ctl.values().to_vec(), ctl.counters(), ctl.steps()), first);
    }
}
