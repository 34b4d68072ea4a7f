//! Multi-round driver.
//!
//! - [`Experiment`] — Plays every scheduled round, finishes the lifecycle, exports the trace
//! - [`Results`] — Aggregate of metadata, per-player statistics, history and events
mod experiment;
mod results;

pub use experiment::*;
pub use results::*;
