//! Payoff oracles.
//!
//! - [`Game`] — Maps a joint action profile to per-player rewards
//! - [`MatrixGame`] — Two-player game given by a pair of payoff matrices
//! - [`PrisonersDilemma`], [`Chicken`], [`Coordination`] — Named parameterizations
mod chicken;
mod coordination;
mod dilemma;
mod game;
mod matrix;

pub use chicken::*;
pub use coordination::*;
pub use dilemma::*;
pub use game::*;
pub use matrix::*;
