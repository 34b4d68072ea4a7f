//! Runs one or more independent matrix-game experiments.
//!
//! `simulate pd --players tft,regret --rounds 100 --games 4`

use clap::Parser;

fn main() -> anyhow::Result<()> {
    matrixgames::log()?;
    matrixgames::Simulation::parse().run()
}
