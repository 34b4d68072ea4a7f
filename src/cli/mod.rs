//! Command-line shell around [`Experiment`](crate::Experiment).
//!
//! - [`Simulation`] — Parsed arguments; runs N independent games in parallel
//! - [`GameChoice`] — Which game, with its parameters
//! - [`PlayerKind`] — Which variant sits in each seat
mod choice;
mod simulation;

pub use choice::*;
pub use simulation::*;
