use super::*;
use crate::*;
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;

/// Repeated matrix games between heterogeneous agents.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Simulation {
    #[command(subcommand)]
    pub game: GameChoice,
    #[arg(
        long,
        global = true,
        value_enum,
        value_delimiter = ',',
        default_values_t = [PlayerKind::Tft, PlayerKind::Regret],
        help = "Player kind per seat"
    )]
    pub players: Vec<PlayerKind>,
    #[arg(long, global = true, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,
    #[arg(long, global = true, help = "Log each selection as it arrives")]
    pub sequential: bool,
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    #[arg(long, global = true, default_value_t = 1, help = "Independent games to run in parallel")]
    pub games: usize,
    #[arg(long, global = true, default_value = "results")]
    pub out: PathBuf,
    #[arg(long, global = true, default_value = "json", help = "Trace format: json, csv or txt")]
    pub format: String,
    #[arg(long, global = true, help = "One oracle reply per line, for scripted players")]
    pub script: Option<PathBuf>,
    #[arg(long, global = true, help = "Ask scripted players for a chain of thought")]
    pub cot: bool,
    #[arg(long, global = true, help = "Also write strategy, payoff and convergence reports")]
    pub analysis: bool,
}

impl Simulation {
    /// Runs every game. One failing game doesn't stop the rest.
    pub fn run(&self) -> anyhow::Result<()> {
        let format = Format::try_from(self.format.as_str())?;
        log::info!(
            "[simulate] {} game(s) of {} rounds into {}",
            self.games,
            self.rounds,
            self.out.display()
        );
        let failures = (0..self.games)
            .into_par_iter()
            .map(|i| (i, self.play(i, format)))
            .filter_map(|(i, result)| result.err().map(|e| (i, e)))
            .collect::<Vec<_>>();
        for (i, e) in failures.iter() {
            log::error!("[simulate] game {} failed: {:#}", i, e);
        }
        match failures.len() {
            n if n > 0 && n == self.games => Err(anyhow::anyhow!("all {} games failed", n)),
            _ => Ok(()),
        }
    }

    /// One self-contained game: its own game, players, state and seed.
    fn play(&self, index: usize, format: Format) -> anyhow::Result<Results> {
        let seed = self.seed.wrapping_add(index as u64);
        let dir = self.out.join(format!("game_{}", index));
        let game = self.game.build();
        let names = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, kind)| format!("{}_{}", kind.label(), seat))
            .collect::<Vec<_>>();
        let players = self
            .players
            .iter()
            .zip(names.iter())
            .enumerate()
            .map(|(seat, (kind, name))| {
                let seed = seed.wrapping_add(1 + seat as u64);
                kind.build(name, game.num_actions(), seed, self.script.as_deref(), self.cot)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let state = GameState::new(self.rounds, names, self.sequential);
        let moderator = Moderator::new(game, players, state, seed)?;
        let logger = EventLogger::file(dir.join(format!("events.{}", format.extension())), format);
        let mut experiment = Experiment::new(moderator, Some(logger));
        let results = experiment.run()?;
        results.save(dir.join("results.json"), Format::Json)?;
        results.save(dir.join("summary.txt"), Format::Text)?;
        if self.analysis {
            AnalysisLogger::new(dir.join("analysis"))?.log_all(experiment.moderator())?;
        }
        log::info!("[simulate] game {}\n{}", index, results.summary());
        Ok(results)
    }
}
