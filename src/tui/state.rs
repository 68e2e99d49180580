use crate::model::AlgorithmKind;
use crate::orchestrator::VisualEvent;
use crate::presenter::Presenter;
use std::collections::BTreeSet;
use std::time::Duration;

/// Largest sequence the `+` key will grow to; wider than this the bars stop being readable.
pub const MAX_SIZE: usize = 200;

pub struct UiState {
    pub tab: usize,
    pub algorithm: AlgorithmKind,
    pub info: String,

    // Latest rendered frame
    pub values: Vec<i32>,
    pub active: BTreeSet<usize>,
    pub settled: BTreeSet<usize>,
    pub comparisons: u64,
    pub swaps: u64,
    pub steps: u64,
    pub done: bool,

    pub auto: bool,
    pub interval: Duration,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            algorithm: AlgorithmKind::default(),
            info: String::new(),
            values: Vec::new(),
            active: BTreeSet::new(),
            settled: BTreeSet::new(),
            comparisons: 0,
            swaps: 0,
            steps: 0,
            done: false,
            auto: false,
            interval: Duration::from_millis(200),
        }
    }
}

impl Presenter for UiState {
    fn render(&mut self, values: &[i32], active: &BTreeSet<usize>, settled: &BTreeSet<usize>) {
        self.values.clear();
        self.values.extend_from_slice(values);
        self.active.clone_from(active);
        self.settled.clone_from(settled);
    }

    fn update_counters(&mut self, comparisons: u64, swaps: u64) {
        self.comparisons = comparisons;
        self.swaps = swaps;
    }
}

impl UiState {
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn apply_event(&mut self, ev: VisualEvent) {
        match ev {
            VisualEvent::Frame(frame) => {
                if frame.algorithm != self.algorithm {
                    self.info = format!("Algorithm: {}", frame.algorithm.as_str());
                }
                self.algorithm = frame.algorithm;
                self.steps = frame.steps;
                self.done = frame.done;
                self.auto = frame.auto;
                frame.present(self);
            }
            VisualEvent::Notice(msg) => self.info = msg,
            VisualEvent::AutoChanged(on) => {
                self.auto = on;
                self.info = if on {
                    format!("Auto mode on ({})", humantime::format_duration(self.interval))
                } else {
                    "Auto mode off".into()
                };
            }
            VisualEvent::Completed {
                algorithm,
                counters,
                steps,
            } => {
                self.info = format!(
                    "{} finished: {} comparisons, {} swaps in {} steps",
                    algorithm.as_str(),
                    counters.comparisons,
                    counters.swaps,
                    steps
                );
            }
        }
    }
}
