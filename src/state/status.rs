use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Lifecycle of a game. Moves forward only, and never skips a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Initialized,
    Running,
    Finished,
}

impl Status {
    /// Validates a transition. Re-entering `Running` is allowed since every
    /// round asserts it; `Finished` is terminal.
    pub fn advance(self, to: Self) -> Result<Self, GameError> {
        match (self, to) {
            (Self::Initialized, Self::Running) => Ok(to),
            (Self::Running, Self::Running) => Ok(to),
            (Self::Running, Self::Finished) => Ok(to),
            (from, to) => Err(GameError::IllegalTransition { from, to }),
        }
    }
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
