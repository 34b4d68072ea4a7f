use crate::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

/// One player's record and learning state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub kind: String,
    pub history: Vec<(Policy, Utility)>,
    pub total_reward: Utility,
    pub average_reward: Utility,
    pub num_rounds: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_strategy: Option<Policy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regrets: Option<Vec<Utility>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_history: Option<Vec<Action>>,
}

/// Payoffs over time plus the game's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffReport {
    pub cumulative_payoffs: BTreeMap<String, Utility>,
    pub round_payoffs: BTreeMap<String, Vec<Utility>>,
    pub game_info: GameSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_matrices: Option<BTreeMap<String, Vec<Vec<Utility>>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    #[serde(rename = "type")]
    pub name: String,
    pub num_actions: usize,
    pub num_players: usize,
}

/// How far a learner is from settling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConvergenceReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regrets: Option<Vec<Utility>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regret_magnitude: Option<Vec<Utility>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_regret: Option<Utility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_strategy: Option<Policy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_entropy: Option<f64>,
}

/// Writes post-run reports into a directory.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisLogger {
    dir: PathBuf,
}

impl AnalysisLogger {
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes all three reports.
    pub fn log_all(&self, moderator: &Moderator) -> anyhow::Result<()> {
        self.log_player_strategies(moderator)?;
        self.log_payoff_analysis(moderator.state(), moderator.game())?;
        self.log_convergence_analysis(moderator)?;
        Ok(())
    }
    pub fn log_player_strategies(&self, moderator: &Moderator) -> anyhow::Result<()> {
        self.write("player_strategies.json", &Self::strategies(moderator))
    }
    pub fn log_payoff_analysis(&self, state: &GameState, game: &dyn Game) -> anyhow::Result<()> {
        self.write("payoff_analysis.json", &Self::payoffs(state, game))
    }
    pub fn log_convergence_analysis(&self, moderator: &Moderator) -> anyhow::Result<()> {
        self.write("convergence_analysis.json", &Self::convergence(moderator))
    }

    fn write(&self, name: &str, report: &impl Serialize) -> anyhow::Result<()> {
        let path = self.dir.join(name);
        std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
        log::debug!("[analysis] wrote {}", path.display());
        Ok(())
    }
}

impl AnalysisLogger {
    pub fn strategies(moderator: &Moderator) -> BTreeMap<String, StrategyReport> {
        moderator
            .players()
            .iter()
            .map(|p| {
                let report = StrategyReport {
                    kind: p.kind().to_string(),
                    history: p.history().to_vec(),
                    total_reward: p.total_reward(),
                    average_reward: p.average_reward(),
                    num_rounds: p.history().len(),
                    average_strategy: p.averaging().map(|a| a.average_strategy()),
                    regrets: p.regretful().map(|r| r.regrets().to_vec()),
                    opponent_history: p.opponent_memory().map(<[Action]>::to_vec),
                };
                (p.name().to_string(), report)
            })
            .collect()
    }

    pub fn payoffs(state: &GameState, game: &dyn Game) -> PayoffReport {
        let mut cumulative = state
            .players()
            .iter()
            .map(|p| (p.clone(), 0.0))
            .collect::<BTreeMap<_, _>>();
        let mut per_round = state
            .players()
            .iter()
            .map(|p| (p.clone(), Vec::new()))
            .collect::<BTreeMap<_, _>>();
        for round in state.round_history() {
            for (name, reward) in round.rewards.iter() {
                *cumulative.entry(name.clone()).or_default() += reward;
                per_round.entry(name.clone()).or_default().push(*reward);
            }
        }
        let matrices = (0..game.num_players())
            .map(|i| game.matrix(i).map(|m| (format!("player_{}", i), m.to_vec())))
            .collect::<Option<BTreeMap<_, _>>>();
        PayoffReport {
            cumulative_payoffs: cumulative,
            round_payoffs: per_round,
            game_info: GameSummary {
                name: game.to_string(),
                num_actions: game.num_actions(),
                num_players: game.num_players(),
            },
            payoff_matrices: matrices,
        }
    }

    /// Only players with regrets or an average strategy appear.
    pub fn convergence(moderator: &Moderator) -> BTreeMap<String, ConvergenceReport> {
        moderator
            .players()
            .iter()
            .filter_map(|p| {
                let regrets = p.regretful().map(|r| r.regrets().to_vec()).filter(|r| !r.is_empty());
                let average = p.averaging().map(|a| a.average_strategy());
                if regrets.is_none() && average.is_none() {
                    return None;
                }
                let magnitude = regrets
                    .as_ref()
                    .map(|r| r.iter().map(|x| x.abs()).collect::<Vec<_>>());
                let report = ConvergenceReport {
                    max_regret: magnitude
                        .as_ref()
                        .map(|m| m.iter().copied().fold(0.0, Utility::max)),
                    regret_magnitude: magnitude,
                    regrets,
                    strategy_entropy: average.as_deref().map(entropy),
                    average_strategy: average,
                };
                Some((p.name().to_string(), report))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn played() -> Moderator {
        let players: Vec<Box<dyn Player>> = vec![
            Box::new(TitForTat::new("tft", 2, 0).unwrap()),
            Box::new(RegretMatcher::new("rm", 2)),
        ];
        let state = GameState::new(6, vec!["tft".into(), "rm".into()], false);
        let game = Arc::new(PrisonersDilemma::default());
        let mut moderator = Moderator::new(game, players, state, DEFAULT_SEED).unwrap();
        for _ in 0..6 {
            moderator.play_round().unwrap();
        }
        moderator
    }

    #[test]
    fn strategies_carry_variant_specifics() {
        let moderator = played();
        let reports = AnalysisLogger::strategies(&moderator);
        assert_eq!(reports["tft"].kind, "tit_for_tat");
        assert_eq!(reports["tft"].opponent_history.as_ref().map(Vec::len), Some(5));
        assert!(reports["tft"].regrets.is_none());
        assert!(reports["rm"].average_strategy.is_some());
        assert_eq!(reports["rm"].num_rounds, 6);
    }
    #[test]
    fn payoffs_accumulate_per_player() {
        let moderator = played();
        let report = AnalysisLogger::payoffs(moderator.state(), moderator.game());
        assert_eq!(report.round_payoffs["rm"].len(), 6);
        let sum = report.round_payoffs["rm"].iter().sum::<f64>();
        assert_eq!(report.cumulative_payoffs["rm"], sum);
        let matrices = report.payoff_matrices.unwrap();
        assert_eq!(matrices["player_0"], vec![vec![3.0, 0.0], vec![5.0, 1.0]]);
        assert_eq!(report.game_info.num_players, 2);
    }
    #[test]
    fn convergence_skips_non_learners() {
        let moderator = played();
        let report = AnalysisLogger::convergence(&moderator);
        assert!(!report.contains_key("tft"));
        let rm = &report["rm"];
        let max = rm.regret_magnitude.as_ref().unwrap().iter().copied().fold(0.0, f64::max);
        assert_eq!(rm.max_regret, Some(max));
        let entropy = rm.strategy_entropy.unwrap();
        assert!((0.0..=1.0).contains(&entropy));
    }
    #[test]
    fn writes_three_reports() {
        let dir = std::env::temp_dir().join(format!("matrixgames-analysis-{}", std::process::id()));
        let analysis = AnalysisLogger::new(&dir).unwrap();
        analysis.log_all(&played()).unwrap();
        for name in ["player_strategies.json", "payoff_analysis.json", "convergence_analysis.json"] {
            let text = std::fs::read_to_string(dir.join(name)).unwrap();
            assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
        }
        std::fs::remove_dir_all(dir).ok();
    }
}
