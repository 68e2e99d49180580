//! Application-level orchestration.
//!
//! This module owns the run controller (sequence, algorithm state, counters, auto mode),
//! the single-flight step latch, and the async loop that connects them to a presentation
//! layer. UI/CLI layers call into this module to keep responsibilities separated.

mod controller;
mod driver;
mod flight;

pub use controller::{run_to_completion, ControlError, RunController, MIN_INTERVAL};
pub use driver::{drive, UiCommand, VisualEvent};
pub use flight::{FlightPermit, SingleFlight};
