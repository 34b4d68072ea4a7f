use crate::*;
use chrono::DateTime;
use chrono::Local;
use serde_json::json;

/// Runs a moderator through every scheduled round.
pub struct Experiment {
    moderator: Moderator,
    logger: Option<EventLogger>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
}

impl Experiment {
    pub fn new(moderator: Moderator, logger: Option<EventLogger>) -> Self {
        Self {
            moderator,
            logger,
            start: None,
            end: None,
        }
    }
    pub fn moderator(&self) -> &Moderator {
        &self.moderator
    }
    pub fn state(&self) -> &GameState {
        self.moderator.state()
    }

    /// Plays all remaining rounds, finishes the lifecycle and exports the
    /// trace if a logger is attached. A round error stops the run with the
    /// state left `running`.
    pub fn run(&mut self) -> anyhow::Result<Results> {
        self.moderator.state().status().advance(Status::Running)?;
        let start = Local::now();
        self.start = Some(start);
        let (rounds, players, sequential) = {
            let state = self.moderator.state();
            (state.num_rounds(), state.players().to_vec(), state.sequential())
        };
        log::info!(
            "[experiment] {} for {} rounds with {} (sequential: {})",
            self.moderator.game(),
            rounds,
            players.join(", "),
            sequential
        );
        self.moderator.record(
            EventKind::ExperimentStart,
            json!({
                "timestamp": start.to_rfc3339(),
                "num_rounds": rounds,
                "players": players,
                "sequential": sequential,
            }),
        );
        self.moderator.transition(Status::Running)?;
        while !self.moderator.state().is_complete() {
            self.moderator.play_round()?;
            let round = self.moderator.state().current_round();
            if round % PROGRESS_INTERVAL == 0 {
                for (name, stats) in self.moderator.player_stats() {
                    log::info!(
                        "[experiment] round {}/{} {}: avg_reward={:.3}",
                        round,
                        rounds,
                        name,
                        stats.average_reward
                    );
                }
            }
        }
        let end = Local::now();
        self.end = Some(end);
        self.moderator.transition(Status::Finished)?;
        self.moderator.record(
            EventKind::ExperimentComplete,
            json!({
                "timestamp": end.to_rfc3339(),
                "duration_seconds": seconds(start, end),
                "total_rounds": self.moderator.state().current_round(),
            }),
        );
        if let Some(logger) = &self.logger {
            logger.dump(self.moderator.state())?;
        }
        log::info!(
            "[experiment] finished {} rounds in {:.2}s",
            rounds,
            seconds(start, end)
        );
        Ok(self.results())
    }

    pub fn results(&self) -> Results {
        let state = self.moderator.state();
        Results {
            experiment_metadata: Metadata {
                duration_seconds: self.start.zip(self.end).map_or(0.0, |(s, e)| seconds(s, e)),
                num_rounds: state.num_rounds(),
                players: state.players().to_vec(),
                sequential: state.sequential(),
                start_time: self.start.map(|t| t.to_rfc3339()),
                end_time: self.end.map(|t| t.to_rfc3339()),
            },
            game_state: Snapshot {
                current_round: state.current_round(),
                status: state.status(),
                num_events: state.event_log().len(),
            },
            player_statistics: self.moderator.player_stats(),
            round_history: state.round_history().to_vec(),
            event_log: state.event_log().to_vec(),
        }
    }

    pub fn summary(&self) -> String {
        self.results().summary()
    }
}

fn seconds(start: DateTime<Local>, end: DateTime<Local>) -> f64 {
    (end - start).num_microseconds().unwrap_or(0) as f64 / 1e6
}

impl std::fmt::Display for Experiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Experiment({}, {})", self.moderator.game(), self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn experiment(rounds: usize, logger: Option<EventLogger>) -> Experiment {
        let players: Vec<Box<dyn Player>> = vec![
            Box::new(TitForTat::new("tft", 2, 0).unwrap()),
            Box::new(RegretMatcher::new("rm", 2)),
        ];
        let state = GameState::new(rounds, vec!["tft".into(), "rm".into()], false);
        let game = Arc::new(PrisonersDilemma::default());
        let moderator = Moderator::new(game, players, state, DEFAULT_SEED).unwrap();
        Experiment::new(moderator, logger)
    }
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("matrixgames-experiment-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn runs_every_round_and_finishes() {
        let mut experiment = experiment(20, None);
        let results = experiment.run().unwrap();
        assert!(results.is_finished());
        assert_eq!(results.round_history.len(), 20);
        assert_eq!(results.game_state.current_round, 20);
        assert_eq!(results.game_state.num_events, results.event_log.len());
        assert_eq!(results.event_log.first().map(|e| e.event), Some(EventKind::ExperimentStart));
        assert_eq!(results.event_log.last().map(|e| e.event), Some(EventKind::ExperimentComplete));
        assert_eq!(results.event_log.last().map(|e| e.status), Some(Status::Finished));
        assert_eq!(results.player_statistics["rm"].num_rounds, 20);
        assert!(results.player_statistics["rm"].average_strategy.is_some());
    }
    #[test]
    fn zero_rounds_still_finish() {
        let mut experiment = experiment(0, None);
        let results = experiment.run().unwrap();
        assert!(results.is_finished());
        assert!(results.round_history.is_empty());
        assert_eq!(results.event_log.len(), 2);
    }
    #[test]
    fn summary_waits_for_completion() {
        let mut experiment = experiment(3, None);
        assert_eq!(experiment.summary(), "Experiment not yet completed.");
        experiment.run().unwrap();
        let summary = experiment.summary();
        assert!(summary.starts_with("Experiment Summary"));
        assert!(summary.contains("Rounds: 3/3"));
        assert!(summary.contains("  tft:"));
    }
    #[test]
    fn cannot_run_twice() {
        let mut experiment = experiment(2, None);
        experiment.run().unwrap();
        let events = experiment.state().event_log().len();
        assert!(experiment.run().is_err());
        assert_eq!(experiment.state().round_history().len(), 2);
        assert_eq!(experiment.state().event_log().len(), events);
    }
    #[test]
    fn same_seed_same_history() {
        let a = experiment(15, None).run().unwrap();
        let b = experiment(15, None).run().unwrap();
        assert_eq!(a.round_history, b.round_history);
        assert_eq!(a.player_statistics, b.player_statistics);
    }
    #[test]
    fn dumps_trace_through_logger() {
        let path = scratch("run.json");
        let logger = EventLogger::file(&path, Format::Json);
        let results = experiment(5, Some(logger)).run().unwrap();
        let file = EventLogger::load(&path).unwrap();
        assert_eq!(file.event_log, results.event_log);
        std::fs::remove_file(path).ok();
    }
    #[test]
    fn results_save_and_reload() {
        let results = experiment(4, None).run().unwrap();
        let json = scratch("results.json");
        results.save(&json, Format::Json).unwrap();
        assert_eq!(Results::load(&json).unwrap(), results);
        let txt = scratch("results.txt");
        results.save(&txt, Format::Text).unwrap();
        assert_eq!(std::fs::read_to_string(&txt).unwrap(), results.summary());
        let error = results.save(scratch("results.csv"), Format::Csv).unwrap_err();
        assert_eq!(
            error.downcast_ref::<GameError>(),
            Some(&GameError::UnsupportedFormat("csv".into()))
        );
        std::fs::remove_file(json).ok();
        std::fs::remove_file(txt).ok();
    }
}
