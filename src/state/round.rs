use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one completed round, keyed by player name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round: usize,
    pub actions: BTreeMap<String, Action>,
    pub rewards: BTreeMap<String, Utility>,
    pub policies: BTreeMap<String, Policy>,
    pub chain_of_thought: BTreeMap<String, String>,
}

impl Round {
    /// Action of the first player other than `me`.
    pub fn opponent_action(&self, me: &str) -> Option<Action> {
        self.actions
            .iter()
            .find(|(name, _)| name.as_str() != me)
            .map(|(_, action)| *action)
    }
}
