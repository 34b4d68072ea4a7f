use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// One (policy, reward) pair per completed round, plus their running total.
/// Growing the history and updating the total happen together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    history: Vec<(Policy, Utility)>,
    total: Utility,
}

impl Ledger {
    pub fn push(&mut self, policy: Policy, reward: Utility) {
        self.history.push((policy, reward));
        self.total += reward;
    }
    pub fn history(&self) -> &[(Policy, Utility)] {
        &self.history
    }
    pub fn total(&self) -> Utility {
        self.total
    }
    pub fn len(&self) -> usize {
        self.history.len()
    }
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
    pub fn average(&self) -> Utility {
        match self.history.len() {
            0 => 0.0,
            n => self.total / n as Utility,
        }
    }
    pub fn last_policy(&self) -> Option<&Policy> {
        self.history.last().map(|(policy, _)| policy)
    }
}
