//! Append-only record of a game in progress.
//!
//! - [`GameState`] — Round counter, lifecycle, round history and event log
//! - [`Status`] — `initialized` → `running` → `finished`
//! - [`Round`] — Actions, rewards, policies and rationales of one completed round
//! - [`Event`] / [`EventKind`] — Structured audit entries
mod event;
mod round;
mod state;
mod status;

pub use event::*;
pub use round::*;
pub use state::*;
pub use status::*;
