use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Payload carried by a [`Message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Moderator to player: private history plus shared round metadata.
    Briefing(Briefing),
    /// Player to moderator: the chosen policy.
    Decision(Decision),
}

/// Everything a player is told before it picks a policy.
/// Carries only the recipient's own history; nobody sees a peer's record here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Briefing {
    pub history: Vec<(Policy, Utility)>,
    pub round: usize,
    pub total_rounds: usize,
    pub game_info: GameInfo,
}

/// Shape of the game being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub num_actions: usize,
    pub num_players: usize,
    pub sequential: bool,
}

/// A player's answer for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub policy: Policy,
    /// Free-form rationale. Logged, never acted on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_of_thought: Option<String>,
}

impl Decision {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            chain_of_thought: None,
        }
    }
    pub fn with_rationale(policy: Policy, rationale: impl Into<String>) -> Self {
        Self {
            policy,
            chain_of_thought: Some(rationale.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decision_is_tagged() {
        let content = Content::Decision(Decision::new(vec![0.0, 1.0]));
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "decision");
        assert_eq!(json["policy"], serde_json::json!([0.0, 1.0]));
        assert!(json.get("chain_of_thought").is_none());
    }
    #[test]
    fn rationale_is_optional_on_input() {
        let content: Content =
            serde_json::from_str(r#"{"type":"decision","policy":[1.0,0.0]}"#).unwrap();
        assert_eq!(content, Content::Decision(Decision::new(vec![1.0, 0.0])));
    }
}
