//! Strategy interface and its variants.
//!
//! - [`Player`] — Answers a private briefing with a policy
//! - [`RegretUpdatable`], [`StrategyAveraging`] — Optional capabilities a variant may expose
//! - [`Ledger`] — Append-only (policy, reward) history every player keeps
//!
//! ## Variants
//!
//! - [`UniformPlayer`] — Always mixes uniformly
//! - [`TitForTat`] — Opens with a fixed action, then copies the opponent
//! - [`RegretMatcher`] — Plays proportionally to positive cumulative regret
//! - [`DelegatePlayer`] — Defers to an external [`Oracle`] under a bounded [`Correction`] protocol
mod context;
mod correction;
mod delegate;
mod ledger;
mod oracle;
mod player;
mod reactive;
mod regret;
mod uniform;

pub use context::*;
pub use correction::*;
pub use delegate::*;
pub use ledger::*;
pub use oracle::*;
pub use player::*;
pub use reactive::*;
pub use regret::*;
pub use uniform::*;
