//! Text output for headless runs.
//!
//! `StepPrinter` turns each presented step into one line; `build_text_summary` formats
//! the final report.

use crate::model::{describe_algorithm, RunConfig, RunSummary};
use crate::orchestrator::RunController;
use crate::presenter::Presenter;
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

fn join(values: impl IntoIterator<Item = impl std::fmt::Display>, sep: &str) -> String {
    let mut out = String::new();
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        let _ = write!(out, "{v}");
    }
    out
}

/// Presenter that emits `#step [values] cmp=.. swp=.. active=.. settled=..` lines.
pub(crate) struct StepPrinter<F: FnMut(String)> {
    emit: F,
    step: u64,
    pending: String,
}

impl<F: FnMut(String)> StepPrinter<F> {
    pub fn new(emit: F) -> Self {
        Self {
            emit,
            step: 0,
            pending: String::new(),
        }
    }
}

impl<F: FnMut(String)> Presenter for StepPrinter<F> {
    fn render(&mut self, values: &[i32], active: &BTreeSet<usize>, settled: &BTreeSet<usize>) {
        self.step += 1;
        self.pending = format!(
            "#{:<4} [{}] active=[{}] settled={}",
            self.step,
            join(values, " "),
            join(active, ","),
            settled.len()
        );
    }

    fn update_counters(&mut self, comparisons: u64, swaps: u64) {
        let line = format!(
            "{} cmp={comparisons} swp={swaps}",
            std::mem::take(&mut self.pending)
        );
        (self.emit)(line);
    }
}

/// Collect the final state of a finished run.
pub(crate) fn summarize(ctl: &RunController, cfg: &RunConfig) -> RunSummary {
    RunSummary {
        finished_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        algorithm: ctl.kind(),
        original: ctl.original().map(<[i32]>::to_vec).unwrap_or_default(),
        sorted: ctl.values().to_vec(),
        comparisons: ctl.counters().comparisons,
        swaps: ctl.counters().swaps,
        steps: ctl.steps(),
        config: cfg.clone(),
    }
}

/// Build the closing report for text mode.
pub(crate) fn build_text_summary(summary: &RunSummary) -> TextSummary {
    let info = describe_algorithm(summary.algorithm);
    let mut lines = vec![
        format!("{} ({})", info.title, info.complexity),
        format!("Original: [{}]", join(&summary.original, " ")),
        format!("Sorted:   [{}]", join(&summary.sorted, " ")),
        format!(
            "Comparisons: {}  Swaps: {}  Steps: {}",
            summary.comparisons, summary.swaps, summary.steps
        ),
    ];
    if let Some(seed) = summary.config.seed {
        lines.push(format!("Seed: {seed}"));
    }
    TextSummary { lines }
}
