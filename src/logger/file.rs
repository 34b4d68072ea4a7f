use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Run parameters stamped on an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentInfo {
    pub num_rounds: usize,
    pub players: Vec<String>,
    pub sequential: bool,
    /// ISO-8601 export time.
    pub timestamp: String,
}

/// A JSON export, as written by [`EventLogger`] and read back by [`EventLogger::load`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogFile {
    pub experiment_info: ExperimentInfo,
    pub event_log: Vec<Event>,
    pub round_history: Vec<Round>,
}

impl From<&GameState> for LogFile {
    fn from(state: &GameState) -> Self {
        Self {
            experiment_info: ExperimentInfo {
                num_rounds: state.num_rounds(),
                players: state.players().to_vec(),
                sequential: state.sequential(),
                timestamp: chrono::Local::now().to_rfc3339(),
            },
            event_log: state.event_log().to_vec(),
            round_history: state.round_history().to_vec(),
        }
    }
}
