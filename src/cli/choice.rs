use crate::*;
use clap::Subcommand;
use clap::ValueEnum;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Subcommand)]
pub enum GameChoice {
    #[command(about = "Prisoner's dilemma", alias = "pd")]
    Dilemma {
        #[arg(long, default_value_t = 5.0, help = "Temptation payoff")]
        t: Utility,
        #[arg(long, default_value_t = 3.0, help = "Mutual cooperation payoff")]
        r: Utility,
        #[arg(long, default_value_t = 1.0, help = "Mutual defection payoff")]
        p: Utility,
        #[arg(long, default_value_t = 0.0, help = "Sucker's payoff")]
        s: Utility,
    },
    #[command(about = "Hawk-dove / chicken")]
    Chicken {
        #[arg(long, default_value_t = 2.0, help = "Value of the prize")]
        v: Utility,
        #[arg(long, default_value_t = 1.0, help = "Cost of a fight")]
        c: Utility,
    },
    #[command(about = "4x4 coordination game")]
    Coordination,
}

impl GameChoice {
    pub fn build(&self) -> Arc<dyn Game> {
        match *self {
            Self::Dilemma { t, r, p, s } => Arc::new(PrisonersDilemma::new(t, r, p, s)),
            Self::Chicken { v, c } => Arc::new(Chicken::new(v, c)),
            Self::Coordination => Arc::new(Coordination::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Uniform,
    Tft,
    Regret,
    /// Delegates to a scripted oracle read from `--script`.
    Scripted,
}

impl PlayerKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Tft => "tft",
            Self::Regret => "regret",
            Self::Scripted => "scripted",
        }
    }

    /// A fresh player of this kind.
    pub fn build(
        &self,
        name: &str,
        num_actions: usize,
        seed: u64,
        script: Option<&Path>,
        use_cot: bool,
    ) -> anyhow::Result<Box<dyn Player>> {
        let player: Box<dyn Player> = match self {
            Self::Uniform => Box::new(UniformPlayer::new(name, num_actions)),
            Self::Tft => Box::new(TitForTat::new(name, num_actions, 0)?),
            Self::Regret => Box::new(RegretMatcher::new(name, num_actions)),
            Self::Scripted => {
                let path = script.ok_or_else(|| anyhow::anyhow!("scripted players need --script"))?;
                let replies = std::fs::read_to_string(path)?
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>();
                let oracle = ScriptedOracle::new(replies);
                Box::new(DelegatePlayer::new(name, num_actions, oracle, seed)?.with_cot(use_cot))
            }
        };
        Ok(player)
    }
}
