use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// The five sorting algorithms the engine knows how to step through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    #[default]
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::Bubble,
        AlgorithmKind::Insertion,
        AlgorithmKind::Selection,
        AlgorithmKind::Merge,
        AlgorithmKind::Quick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmKind::Bubble => "bubble",
            AlgorithmKind::Insertion => "insertion",
            AlgorithmKind::Selection => "selection",
            AlgorithmKind::Merge => "merge",
            AlgorithmKind::Quick => "quick",
        }
    }

    /// Position in [`AlgorithmKind::ALL`], used for tab-style cycling in the UI.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Static description shown next to the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub complexity: &'static str,
}

pub fn describe_algorithm(kind: AlgorithmKind) -> AlgorithmInfo {
    match kind {
        AlgorithmKind::Bubble => AlgorithmInfo {
            title: "Bubble Sort",
            description: "Compares adjacent elements and swaps them when they are out of order. \
                          Repeats the pass until the array is sorted.",
            complexity: "O(n²) worst, O(n) best",
        },
        AlgorithmKind::Insertion => AlgorithmInfo {
            title: "Insertion Sort",
            description: "Splits the array into a sorted and an unsorted part, then inserts \
                          elements one by one into their correct position.",
            complexity: "O(n²) worst, O(n) best",
        },
        AlgorithmKind::Selection => AlgorithmInfo {
            title: "Selection Sort",
            description: "Finds the smallest remaining element and moves it to its final \
                          position. Repeats until the array is sorted.",
            complexity: "O(n²) all cases",
        },
        AlgorithmKind::Merge => AlgorithmInfo {
            title: "Merge Sort",
            description: "Recursively splits the array in halves, then merges the sorted \
                          subarrays back together.",
            complexity: "O(n log n) all cases",
        },
        AlgorithmKind::Quick => AlgorithmInfo {
            title: "Quick Sort",
            description: "Picks a pivot, partitions the array into elements smaller and larger \
                          than the pivot, and sorts each side.",
            complexity: "O(n log n) average, O(n²) worst",
        },
    }
}

/// Outcome of one step: what to highlight and how much the counters move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub active: BTreeSet<usize>,
    pub settled: BTreeSet<usize>,
    pub comparisons_delta: u64,
    pub swaps_delta: u64,
    pub done: bool,
}

impl ProgressEvent {
    /// Event reported once an algorithm has no work left: every index is settled.
    pub fn finished(len: usize) -> Self {
        Self {
            settled: (0..len).collect(),
            done: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub comparisons: u64,
    pub swaps: u64,
}

impl RunCounters {
    pub fn apply(&mut self, ev: &ProgressEvent) {
        self.comparisons += ev.comparisons_delta;
        self.swaps += ev.swaps_delta;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub algorithm: AlgorithmKind,
    pub size: usize,
    pub min: i32,
    pub max: i32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub values: Option<Vec<i32>>,
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub auto_on_launch: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::Bubble,
            size: 20,
            min: 1,
            max: 100,
            seed: None,
            values: None,
            interval: Duration::from_millis(200),
            auto_on_launch: false,
        }
    }
}

/// Snapshot of the controller handed to presentation layers after every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub algorithm: AlgorithmKind,
    pub values: Vec<i32>,
    pub active: BTreeSet<usize>,
    pub settled: BTreeSet<usize>,
    pub counters: RunCounters,
    pub steps: u64,
    pub done: bool,
    pub auto: bool,
}

/// Final report of a headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub finished_utc: String,
    pub algorithm: AlgorithmKind,
    pub original: Vec<i32>,
    pub sorted: Vec<i32>,
    pub comparisons: u64,
    pub swaps: u64,
    pub steps: u64,
    pub config: RunConfig,
}
