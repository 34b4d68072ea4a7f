use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// When and how an experiment ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub duration_seconds: f64,
    pub num_rounds: usize,
    pub players: Vec<String>,
    pub sequential: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Where the game state stood when results were taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub current_round: usize,
    pub status: Status,
    pub num_events: usize,
}

/// Everything an experiment produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub experiment_metadata: Metadata,
    pub game_state: Snapshot,
    pub player_statistics: BTreeMap<String, PlayerStats>,
    pub round_history: Vec<Round>,
    pub event_log: Vec<Event>,
}

impl Results {
    pub fn is_finished(&self) -> bool {
        self.game_state.status == Status::Finished
    }

    pub fn summary(&self) -> String {
        if !self.is_finished() {
            return "Experiment not yet completed.".to_string();
        }
        let meta = &self.experiment_metadata;
        let mut lines = vec![
            "Experiment Summary".to_string(),
            "==================".to_string(),
            format!("Duration: {:.2} seconds", meta.duration_seconds),
            format!("Rounds: {}/{}", self.game_state.current_round, meta.num_rounds),
            format!("Players: {}", meta.players.join(", ")),
            format!("Sequential: {}", meta.sequential),
            String::new(),
            "Final Results:".to_string(),
        ];
        for (name, stats) in self.player_statistics.iter() {
            lines.push(format!("  {}:", name));
            lines.push(format!("    Total Reward: {:.3}", stats.total_reward));
            lines.push(format!("    Average Reward: {:.3}", stats.average_reward));
            lines.push(format!("    Rounds: {}", stats.num_rounds));
        }
        lines.join("\n")
    }

    /// Writes the full aggregate as JSON, or the summary as text.
    pub fn save(&self, path: impl AsRef<Path>, format: Format) -> anyhow::Result<()> {
        let text = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Text => self.summary(),
            Format::Csv => return Err(GameError::UnsupportedFormat(format.to_string()).into()),
        };
        std::fs::write(path.as_ref(), text)?;
        log::info!("[results] saved {} to {}", format, path.as_ref().display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}
