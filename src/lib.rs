//! Step-through sorting visualizer.
//!
//! The core is a set of resumable sorting state machines ([`engine`]) that do one unit of
//! visible work per step, driven by a [`orchestrator::RunController`] that owns the
//! sequence, the counters and auto mode.

pub mod buffer;
pub mod cli;
pub mod engine;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod presenter;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;
