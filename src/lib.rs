//! Repeated general-sum matrix games between heterogeneous agents.
//!
//! A [`Moderator`] plays one round at a time against a shared [`Game`],
//! querying each [`Player`] through private [`Message`]s and recording
//! everything that happens into an append-only [`GameState`]. An
//! [`Experiment`] drives a full run and hands the finished trace to an
//! [`EventLogger`] for export.
//!
//! ## Modules
//!
//! - [`game`] — Payoff oracles (matrix games and their named parameterizations)
//! - [`players`] — Strategy interface and the uniform, reactive, regret-matching and delegated variants
//! - [`topics`] — Typed envelopes exchanged between moderator and players
//! - [`state`] — Lifecycle, round records and the event log
//! - [`moderator`] — Per-round protocol: brief, collect, sample, score, update
//! - [`experiment`] — Multi-round driver and result aggregation
//! - [`logger`] — JSON / CSV / text export of a game trace
//! - [`analysis`] — Post-run strategy, payoff and convergence reports
//! - `cli` — Argument parsing and parallel game runner for the `simulate` binary
pub mod analysis;
pub mod error;
pub mod experiment;
pub mod game;
pub mod logger;
pub mod moderator;
pub mod players;
pub mod state;
pub mod topics;

#[cfg(feature = "cli")]
pub mod cli;

pub use analysis::*;
pub use error::*;
pub use experiment::*;
pub use game::*;
pub use logger::*;
pub use moderator::*;
pub use players::*;
pub use state::*;
pub use topics::*;

#[cfg(feature = "cli")]
pub use cli::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Rewards, payoffs and cumulative regrets.
pub type Utility = f64;
/// Policy weights and sampling distributions.
pub type Probability = f64;
/// Index into a player's action space.
pub type Action = usize;
/// One weight per action. Either a distribution or a one-hot pure strategy.
pub type Policy = Vec<Probability>;

// ============================================================================
// REGRET MATCHING
// ============================================================================
/// Scale applied to each counterfactual regret increment.
pub const LEARNING_RATE: Utility = 1.0;

// ============================================================================
// DELEGATED DECISIONS
// Bounded self-correction against an external oracle.
// ============================================================================
/// Correction requests issued after the initial decision before falling back.
pub const MAX_CORRECTION_ATTEMPTS: usize = 3;
/// Recent public rounds rendered into the oracle context.
pub const HISTORY_WINDOW: usize = 3;
/// Chain of thought recorded when the oracle never produced a valid decision.
pub const FALLBACK_RATIONALE: &str = "Fallback: validation failed after all attempts";
/// Chain of thought recorded when reasoning was requested but none came back.
pub const EMPTY_RATIONALE: &str = "none/empty";

// ============================================================================
// EXPERIMENTS
// ============================================================================
/// Default number of rounds per experiment.
pub const DEFAULT_ROUNDS: usize = 50;
/// Default seed for moderator and player random streams.
pub const DEFAULT_SEED: u64 = 42;
/// Rounds between progress log lines.
pub const PROGRESS_INTERVAL: usize = 10;
/// Name the moderator signs its messages with.
pub const MODERATOR: &str = "moderator";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Uniform distribution over `n` actions.
pub fn uniform(n: usize) -> Policy {
    vec![1.0 / n as Probability; n]
}

/// Pure strategy placing all weight on `action`.
pub fn one_hot(n: usize, action: Action) -> Policy {
    (0..n)
        .map(|a| if a == action { 1.0 } else { 0.0 })
        .collect()
}
