//! Async command loop around [`RunController`].
//!
//! Presentation layers send [`UiCommand`]s; the loop applies them, runs the auto-step
//! timer and emits [`VisualEvent`]s back.

use super::controller::{ControlError, RunController};
use crate::model::{AlgorithmKind, Frame, ProgressEvent, RunCounters};
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Commands emitted by UI layers to drive the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Regenerate with the current size.
    Generate,
    /// Regenerate with a new size.
    Resize(usize),
    Select(AlgorithmKind),
    Reset,
    Step,
    ToggleAuto,
    RestoreOriginal,
    Quit,
}

/// Events emitted to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualEvent {
    // Box to keep the enum small; frames carry the whole sequence.
    Frame(Box<Frame>),
    Notice(String),
    AutoChanged(bool),
    Completed {
        algorithm: AlgorithmKind,
        counters: RunCounters,
        steps: u64,
    },
}

fn new_ticker(ctl: &RunController) -> Interval {
    let period = ctl.interval();
    // First tick one period from now rather than immediately.
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn emit_frame(ctl: &RunController, event_tx: &UnboundedSender<VisualEvent>) {
    let _ = event_tx.send(VisualEvent::Frame(Box::new(ctl.frame())));
}

/// Step once and report the outcome. Re-entrant requests are dropped quietly.
fn step_and_report(
    ctl: &RunController,
    res: Result<ProgressEvent, ControlError>,
    was_done: bool,
    event_tx: &UnboundedSender<VisualEvent>,
) {
    match res {
        Ok(ev) => {
            emit_frame(ctl, event_tx);
            if ev.done && !was_done {
                let _ = event_tx.send(VisualEvent::Completed {
                    algorithm: ctl.kind(),
                    counters: ctl.counters(),
                    steps: ctl.steps(),
                });
            }
        }
        Err(ControlError::ReentrantStep) => {
            debug!("step ignored: another step is in flight");
        }
        Err(e) => {
            let _ = event_tx.send(VisualEvent::Notice(e.to_string()));
        }
    }
}

fn apply_command(ctl: &mut RunController, cmd: UiCommand, event_tx: &UnboundedSender<VisualEvent>) {
    let outcome: Result<(), ControlError> = match cmd {
        UiCommand::Generate => ctl.generate(ctl.size()),
        UiCommand::Resize(size) => ctl.generate(size),
        UiCommand::Select(kind) => {
            ctl.select_algorithm(kind);
            Ok(())
        }
        UiCommand::Reset => {
            ctl.reset();
            Ok(())
        }
        UiCommand::Step => {
            let was_done = ctl.is_done();
            let res = ctl.step();
            step_and_report(ctl, res, was_done, event_tx);
            return;
        }
        UiCommand::ToggleAuto => {
            ctl.toggle_auto();
            Ok(())
        }
        UiCommand::RestoreOriginal => ctl.restore_original(),
        // Handled by the loop.
        UiCommand::Quit => Ok(()),
    };
    match outcome {
        Ok(()) => emit_frame(ctl, event_tx),
        Err(e) => {
            let _ = event_tx.send(VisualEvent::Notice(e.to_string()));
        }
    }
}

/// Drive `ctl` until a quit command arrives or the command channel closes.
///
/// Returns the controller so callers can inspect the final state.
pub async fn drive(
    mut ctl: RunController,
    event_tx: UnboundedSender<VisualEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<RunController> {
    let mut ticker = ctl.auto_active().then(|| new_ticker(&ctl));
    emit_frame(&ctl, &event_tx);
    if ctl.auto_active() {
        let _ = event_tx.send(VisualEvent::AutoChanged(true));
    }

    loop {
        let was_auto = ctl.auto_active();
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Quit) | None => break,
                    Some(cmd) => apply_command(&mut ctl, cmd, &event_tx),
                }
            }
            // Pending forever while auto mode is off, so this branch never wins.
            _ = async {
                match ticker.as_mut() {
                    Some(t) => {
                        t.tick().await;
                    }
                    None => futures::future::pending::<()>().await,
                }
            } => {
                let was_done = ctl.is_done();
                if let Some(res) = ctl.tick() {
                    step_and_report(&ctl, res, was_done, &event_tx);
                }
            }
        }

        let auto = ctl.auto_active();
        if auto != was_auto {
            // The timer is created and dropped exactly once per auto session.
            ticker = auto.then(|| new_ticker(&ctl));
            let _ = event_tx.send(VisualEvent::AutoChanged(auto));
        }
    }

    debug!("driver stopped");
    Ok(ctl)
}
