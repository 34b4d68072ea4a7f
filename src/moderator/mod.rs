//! Per-round protocol.
//!
//! - [`Moderator`] — Briefs players, collects and samples policies, scores and records each round
//! - [`PlayerStats`] — Snapshot of one player's totals and learning state
//! - [`normalize`], [`sample`] — Turning submitted policies into sampled actions
mod moderator;
mod sampling;
mod stats;

pub use moderator::*;
pub use sampling::*;
pub use stats::*;
