//! Run controller core.
//!
//! Owns the sequence, the active algorithm state, the counters and the auto-mode flag.
//! Every mutation goes through here so reset boundaries stay atomic.

use super::flight::SingleFlight;
use crate::buffer::{BufferError, SequenceBuffer};
use crate::engine::AlgorithmState;
use crate::model::{AlgorithmKind, Frame, ProgressEvent, RunConfig, RunCounters};
use crate::presenter::Presenter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Shortest auto-step interval; tokio timers reject a zero period.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("a step is already in flight")]
    ReentrantStep,
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

pub struct RunController {
    buffer: SequenceBuffer,
    state: AlgorithmState,
    counters: RunCounters,
    steps: u64,
    last: ProgressEvent,
    auto: bool,
    interval: Duration,
    size: usize,
    min: i32,
    max: i32,
    rng: StdRng,
    flight: Arc<SingleFlight>,
}

impl RunController {
    /// Build a controller from config: explicit values if given, otherwise a random sequence.
    pub fn new(cfg: &RunConfig) -> Result<Self, ControlError> {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let buffer = match cfg.values.as_ref() {
            Some(values) => {
                if values.is_empty() {
                    return Err(BufferError::InvalidSize.into());
                }
                SequenceBuffer::from_values(values.clone())
            }
            None => {
                let mut buffer = SequenceBuffer::new();
                buffer.generate(cfg.size, cfg.min, cfg.max, &mut rng)?;
                buffer
            }
        };
        let size = buffer.len();
        Ok(Self {
            buffer,
            state: AlgorithmState::new(cfg.algorithm),
            counters: RunCounters::default(),
            steps: 0,
            last: ProgressEvent::default(),
            auto: false,
            interval: cfg.interval.max(MIN_INTERVAL),
            size,
            min: cfg.min,
            max: cfg.max,
            rng,
            flight: Arc::new(SingleFlight::default()),
        })
    }

    /// Controller over a fixed sequence, mostly for tests and scripted runs.
    pub fn with_values(kind: AlgorithmKind, values: Vec<i32>) -> Self {
        let size = values.len();
        Self {
            buffer: SequenceBuffer::from_values(values),
            state: AlgorithmState::new(kind),
            counters: RunCounters::default(),
            steps: 0,
            last: ProgressEvent::default(),
            auto: false,
            interval: RunConfig::default().interval,
            size,
            min: 1,
            max: 100,
            rng: StdRng::from_entropy(),
            flight: Arc::new(SingleFlight::default()),
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.state.kind()
    }

    pub fn values(&self) -> &[i32] {
        self.buffer.values()
    }

    pub fn original(&self) -> Option<&[i32]> {
        self.buffer.original()
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Set the auto-step interval, clamped to at least [`MIN_INTERVAL`].
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_INTERVAL);
    }

    pub fn auto_active(&self) -> bool {
        self.auto
    }

    pub fn is_done(&self) -> bool {
        self.state.is_finished(self.buffer.len())
    }

    /// Shared handle on the single-flight latch guarding [`RunController::step`].
    ///
    /// `step` takes `&mut self`, so this handle is the hook for callers that step from more
    /// than one place: holding a permit makes every `step` fail with `ReentrantStep`.
    pub fn flight(&self) -> Arc<SingleFlight> {
        Arc::clone(&self.flight)
    }

    /// Recreate the algorithm state, zero counters and stop auto mode. Values are kept.
    pub fn reset(&mut self) {
        self.state = AlgorithmState::new(self.state.kind());
        self.counters = RunCounters::default();
        self.steps = 0;
        self.last = ProgressEvent::default();
        self.stop_auto();
        debug!(algorithm = self.kind().as_str(), "run reset");
    }

    /// Generate a fresh random sequence of `size` values. On error nothing changes.
    pub fn generate(&mut self, size: usize) -> Result<(), ControlError> {
        self.buffer.generate(size, self.min, self.max, &mut self.rng)?;
        self.size = size;
        info!(size, "generated new sequence");
        self.reset();
        Ok(())
    }

    pub fn select_algorithm(&mut self, kind: AlgorithmKind) {
        self.state = AlgorithmState::new(kind);
        info!(algorithm = kind.as_str(), "algorithm selected");
        self.reset();
    }

    /// Put the original snapshot back and reset the run.
    pub fn restore_original(&mut self) -> Result<(), ControlError> {
        self.buffer.restore_original()?;
        info!("restored original sequence");
        self.reset();
        Ok(())
    }

    /// Advance the active algorithm by one unit of work.
    ///
    /// Rejected with [`ControlError::ReentrantStep`] while another step holds the latch.
    pub fn step(&mut self) -> Result<ProgressEvent, ControlError> {
        let flight = Arc::clone(&self.flight);
        let _permit = flight.try_acquire().ok_or(ControlError::ReentrantStep)?;

        let was_done = self.is_done();
        let ev = self.state.step(self.buffer.values_mut());
        self.counters.apply(&ev);
        if !was_done {
            self.steps += 1;
        }
        if ev.done && !was_done {
            info!(
                algorithm = self.kind().as_str(),
                comparisons = self.counters.comparisons,
                swaps = self.counters.swaps,
                steps = self.steps,
                "run completed"
            );
        }
        self.last = ev.clone();
        Ok(ev)
    }

    /// Idempotent: returns false if auto mode was already running.
    pub fn start_auto(&mut self) -> bool {
        if self.auto {
            return false;
        }
        self.auto = true;
        debug!(interval = ?self.interval, "auto mode started");
        true
    }

    /// Idempotent: returns false if auto mode was not running.
    pub fn stop_auto(&mut self) -> bool {
        if !self.auto {
            return false;
        }
        self.auto = false;
        debug!("auto mode stopped");
        true
    }

    /// Flip auto mode and return the new state.
    pub fn toggle_auto(&mut self) -> bool {
        if !self.start_auto() {
            self.stop_auto();
        }
        self.auto
    }

    /// One timer tick: step if auto mode is on, and stop it once the algorithm is done.
    pub fn tick(&mut self) -> Option<Result<ProgressEvent, ControlError>> {
        if !self.auto {
            return None;
        }
        let res = self.step();
        if self.is_done() {
            self.stop_auto();
        }
        Some(res)
    }

    pub fn frame(&self) -> Frame {
        Frame {
            algorithm: self.kind(),
            values: self.buffer.values().to_vec(),
            active: self.last.active.clone(),
            settled: self.last.settled.clone(),
            counters: self.counters,
            steps: self.steps,
            done: self.is_done(),
            auto: self.auto,
        }
    }

    pub fn present<P: Presenter + ?Sized>(&self, p: &mut P) {
        p.render(self.buffer.values(), &self.last.active, &self.last.settled);
        p.update_counters(self.counters.comparisons, self.counters.swaps);
    }
}

/// Step until done, presenting after every step.
pub fn run_to_completion<P: Presenter + ?Sized>(
    ctl: &mut RunController,
    presenter: &mut P,
) -> Result<(), ControlError> {
    while !ctl.is_done() {
        ctl.step()?;
        ctl.present(presenter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<i32>>,
        counters: Vec<(u64, u64)>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, values: &[i32], _: &BTreeSet<usize>, _: &BTreeSet<usize>) {
            self.frames.push(values.to_vec());
        }
        fn update_counters(&mut self, comparisons: u64, swaps: u64) {
            self.counters.push((comparisons, swaps));
        }
    }

    #[test]
    fn bubble_scenario_counts() {
        let mut ctl = RunController::with_values(AlgorithmKind::Bubble, vec![4, 2, 3, 1]);
        let ev = ctl.step().unwrap();
        assert_eq!(ctl.values(), &[2, 4, 3, 1]);
        assert_eq!(ev.active, [0, 1].into_iter().collect());
        assert_eq!(ctl.counters(), RunCounters { comparisons: 1, swaps: 1 });

        let mut rec = Recorder::default();
        run_to_completion(&mut ctl, &mut rec).unwrap();
        assert_eq!(ctl.values(), &[1, 2, 3, 4]);
        assert_eq!(ctl.counters(), RunCounters { comparisons: 6, swaps: 5 });
        assert_eq!(ctl.steps(), 10);
        assert_eq!(rec.frames.len(), 9);
        assert!(rec.counters.windows(2).all(|w| w[0].0 <= w[1].0 && w[0].1 <= w[1].1));
    }

    #[test]
    fn step_after_done_changes_nothing() {
        let mut ctl = RunController::with_values(AlgorithmKind::Quick, vec![3, 1, 2]);
        run_to_completion(&mut ctl, &mut Recorder::default()).unwrap();
        let counters = ctl.counters();
        let steps = ctl.steps();
        let ev = ctl.step().unwrap();
        assert!(ev.done);
        assert_eq!(ctl.counters(), counters);
        assert_eq!(ctl.steps(), steps);
        assert_eq!(ctl.values(), &[1, 2, 3]);
    }

    #[test]
    fn reentrant_step_is_rejected_without_side_effects() {
        let mut ctl = RunController::with_values(AlgorithmKind::Bubble, vec![2, 1]);
        let flight = ctl.flight();
        let permit = flight.try_acquire().unwrap();
        assert_eq!(ctl.step(), Err(ControlError::ReentrantStep));
        assert_eq!(ctl.values(), &[2, 1]);
        assert_eq!(ctl.steps(), 0);
        drop(permit);
        assert!(ctl.step().is_ok());
        assert_eq!(ctl.values(), &[1, 2]);
    }

    #[test]
    fn switch_and_reset_zero_counters() {
        let mut ctl = RunController::with_values(AlgorithmKind::Selection, vec![5, 4, 3]);
        ctl.step().unwrap();
        ctl.step().unwrap();
        assert!(ctl.counters().comparisons > 0);

        ctl.select_algorithm(AlgorithmKind::Merge);
        assert_eq!(ctl.kind(), AlgorithmKind::Merge);
        assert_eq!(ctl.counters(), RunCounters::default());
        assert_eq!(ctl.steps(), 0);

        ctl.step().unwrap();
        ctl.reset();
        assert_eq!(ctl.counters(), RunCounters::default());
        assert!(!ctl.is_done());
    }

    #[test]
    fn restore_original_after_partial_run() {
        let mut ctl = RunController::with_values(AlgorithmKind::Insertion, vec![3, 2, 1]);
        for _ in 0..3 {
            ctl.step().unwrap();
        }
        assert_ne!(ctl.values(), &[3, 2, 1]);
        ctl.restore_original().unwrap();
        assert_eq!(ctl.values(), &[3, 2, 1]);
        assert_eq!(ctl.counters(), RunCounters::default());
    }

    #[test]
    fn failed_generate_keeps_state() {
        let mut ctl = RunController::with_values(AlgorithmKind::Bubble, vec![2, 1]);
        ctl.step().unwrap();
        assert_eq!(
            ctl.generate(0),
            Err(ControlError::Buffer(BufferError::InvalidSize))
        );
        assert_eq!(ctl.values(), &[1, 2]);
        assert_eq!(ctl.steps(), 1);
    }

    #[test]
    fn auto_start_and_stop_are_idempotent() {
        let mut ctl = RunController::with_values(AlgorithmKind::Bubble, vec![2, 1]);
        assert!(ctl.start_auto());
        assert!(!ctl.start_auto());
        assert!(ctl.stop_auto());
        assert!(!ctl.stop_auto());
        assert!(ctl.tick().is_none());
    }

    #[test]
    fn auto_ticks_stop_on_completion() {
        let mut ctl = RunController::with_values(AlgorithmKind::Selection, vec![3, 1, 2]);
        ctl.toggle_auto();
        let mut ticks = 0;
        while ctl.tick().is_some() {
            ticks += 1;
        }
        assert!(!ctl.auto_active());
        assert!(ctl.is_done());
        assert_eq!(ctl.values(), &[1, 2, 3]);
        assert_eq!(ticks as u64, ctl.steps());
    }

    #[test]
    fn reset_stops_auto() {
        let mut ctl = RunController::with_values(AlgorithmKind::Quick, vec![3, 1, 2]);
        ctl.start_auto();
        ctl.reset();
        assert!(!ctl.auto_active());
    }

    #[test]
    fn seeded_config_is_deterministic() {
        let cfg = RunConfig {
            seed: Some(42),
            size: 16,
            ..Default::default()
        };
        let a = RunController::new(&cfg).unwrap();
        let b = RunController::new(&cfg).unwrap();
        assert_eq!(a.values(), b.values());
        assert_eq!(a.size(), 16);
    }

    #[test]
    fn empty_explicit_values_rejected() {
        let cfg = RunConfig {
            values: Some(Vec::new()),
            ..Default::default()
        };
        assert!(matches!(
            RunController::new(&cfg),
            Err(ControlError::Buffer(BufferError::InvalidSize))
        ));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut ctl = RunController::with_values(AlgorithmKind::Bubble, vec![2, 1]);
        ctl.set_interval(Duration::ZERO);
        assert_eq!(ctl.interval(), MIN_INTERVAL);

        let cfg = RunConfig {
            interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(RunController::new(&cfg).unwrap().interval(), MIN_INTERVAL);
    }

    #[test]
    fn generate_mid_run_starts_a_fresh_run() {
        let cfg = RunConfig {
            algorithm: AlgorithmKind::Merge,
            size: 12,
            seed: Some(7),
            ..Default::default()
        };
        let mut ctl = RunController::new(&cfg).unwrap();
        ctl.step().unwrap();
        ctl.step().unwrap();
        assert!(ctl.counters().comparisons > 0);

        ctl.generate(8).unwrap();
        assert_eq!(ctl.counters(), RunCounters::default());
        assert_eq!(ctl.steps(), 0);
        assert!(!ctl.is_done());
        assert_eq!(ctl.values().len(), 8);

        // A stale merge plan would replay snapshots of the old 12-value sequence.
        run_to_completion(&mut ctl, &mut Recorder::default()).unwrap();
        let mut expected = ctl.original().unwrap().to_vec();
        expected.sort();
        assert_eq!(ctl.values(), expected.as_slice());
        assert_eq!(ctl.steps(), 7);
    }
}
