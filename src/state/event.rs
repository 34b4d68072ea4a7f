use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ExperimentStart,
    RoundStart,
    PolicySelected,
    PolicyFallback,
    ActionSampled,
    PayoffsComputed,
    RoundEnd,
    RoundAborted,
    ExperimentComplete,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExperimentStart => "experiment_start",
            Self::RoundStart => "round_start",
            Self::PolicySelected => "policy_selected",
            Self::PolicyFallback => "policy_fallback",
            Self::ActionSampled => "action_sampled",
            Self::PayoffsComputed => "payoffs_computed",
            Self::RoundEnd => "round_end",
            Self::RoundAborted => "round_aborted",
            Self::ExperimentComplete => "experiment_complete",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audit entry.
///
/// `chain_of_thought` mirrors the field of the same name in `details`,
/// lifted to the top level whatever its shape: a single rationale on
/// selections, a map of player to rationale on round records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub round: usize,
    pub event: EventKind,
    pub details: serde_json::Value,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_of_thought: Option<serde_json::Value>,
}

impl Event {
    pub fn new(round: usize, event: EventKind, details: serde_json::Value, status: Status) -> Self {
        let chain_of_thought = details
            .get("chain_of_thought")
            .filter(|v| !v.is_null())
            .cloned();
        Self {
            round,
            event,
            details,
            status,
            chain_of_thought,
        }
    }
    /// The lifted rationale, when it is a single string.
    pub fn rationale(&self) -> Option<&str> {
        self.chain_of_thought.as_ref().and_then(serde_json::Value::as_str)
    }
    /// Name of the player this event concerns, if any.
    pub fn player(&self) -> Option<&str> {
        self.details.get("player").and_then(serde_json::Value::as_str)
    }
}
