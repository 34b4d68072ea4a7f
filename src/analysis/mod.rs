//! Post-run reports.
//!
//! - [`AnalysisLogger`] — Writes strategy, payoff and convergence reports into a directory
//! - [`entropy`] — Shannon entropy of a strategy, in bits
mod entropy;
mod reports;

pub use entropy::*;
pub use reports::*;
