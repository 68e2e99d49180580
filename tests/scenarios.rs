//! Hand-traced regression fixtures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sortstep::buffer::{BufferError, SequenceBuffer};
use sortstep::engine::AlgorithmState;
use sortstep::model::{AlgorithmKind, ProgressEvent, RunConfig, RunCounters};
use sortstep::orchestrator::{ControlError, RunController};

fn run_all(kind: AlgorithmKind, input: &[i32]) -> (Vec<i32>, Vec<ProgressEvent>) {
    let mut values = input.to_vec();
    let mut state = AlgorithmState::new(kind);
    let mut events = Vec::new();
    loop {
        let ev = state.step(&mut values);
        let done = ev.done;
        events.push(ev);
        if done {
            break;
        }
    }
    (values, events)
}

#[test]
fn bubble_four_elements() {
    let mut ctl = RunController::with_values(AlgorithmKind::Bubble, vec![4, 2, 3, 1]);
    ctl.step().unwrap();
    assert_eq!(ctl.values(), &[2, 4, 3, 1]);
    assert_eq!(ctl.counters(), RunCounters { comparisons: 1, swaps: 1 });
    while !ctl.is_done() {
        ctl.step().unwrap();
    }
    assert_eq!(ctl.values(), &[1, 2, 3, 4]);
    assert_eq!(ctl.counters(), RunCounters { comparisons: 6, swaps: 5 });
}

#[test]
fn bubble_pass_boundaries_are_reported() {
    let (_, events) = run_all(AlgorithmKind::Bubble, &[4, 2, 3, 1]);
    let boundaries = events
        .iter()
        .filter(|e| e.comparisons_delta == 0 && e.active.is_empty())
        .count();
    assert_eq!(boundaries, 4);
}

#[test]
fn quick_three_elements() {
    let (values, events) = run_all(AlgorithmKind::Quick, &[3, 1, 2]);
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].active, [1].into_iter().collect());
    for ev in &events[1..] {
        assert_eq!((ev.comparisons_delta, ev.swaps_delta), (0, 0));
    }
    assert!(events[2].done);
}

#[test]
fn merge_step_count_is_n_minus_one() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in [1usize, 2, 7, 64, 100] {
        let input: Vec<i32> = (0..n).map(|_| rng.gen_range(1..=100)).collect();
        let (_, events) = run_all(AlgorithmKind::Merge, &input);
        assert_eq!(events.len(), n.max(2) - 1, "n={n}");
    }
}

#[test]
fn done_events_settle_everything() {
    for kind in AlgorithmKind::ALL {
        let (_, events) = run_all(kind, &[9, 1, 8, 2, 7]);
        let last = events.last().unwrap();
        assert!(last.done);
        assert_eq!(last.settled, (0..5).collect(), "{kind:?}");
    }
}

#[test]
fn generation_errors_leave_buffer_untouched() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut buf = SequenceBuffer::new();
    assert_eq!(buf.restore_original(), Err(BufferError::NoOriginal));
    buf.generate(10, 1, 100, &mut rng).unwrap();
    let before = buf.values().to_vec();
    assert_eq!(buf.generate(0, 1, 100, &mut rng), Err(BufferError::InvalidSize));
    assert_eq!(buf.values(), before.as_slice());
}

#[test]
fn controller_from_config_generates_requested_size() {
    let cfg = RunConfig {
        algorithm: AlgorithmKind::Insertion,
        size: 33,
        seed: Some(5),
        ..Default::default()
    };
    let mut ctl = RunController::new(&cfg).unwrap();
    assert_eq!(ctl.values().len(), 33);
    assert!(ctl.values().iter().all(|v| (1..=100).contains(v)));
    assert_eq!(ctl.kind(), AlgorithmKind::Insertion);

    ctl.generate(12).unwrap();
    assert_eq!(ctl.size(), 12);
    assert_eq!(
        ctl.generate(0),
        Err(ControlError::Buffer(BufferError::InvalidSize))
    );
    assert_eq!(ctl.size(), 12);
}
