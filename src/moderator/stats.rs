use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Summary of one player's record and learning state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub kind: String,
    pub total_reward: Utility,
    pub average_reward: Utility,
    pub num_rounds: usize,
    pub last_policy: Policy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_strategy: Option<Policy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regrets: Option<Vec<Utility>>,
}

impl From<&dyn Player> for PlayerStats {
    fn from(player: &dyn Player) -> Self {
        Self {
            kind: player.kind().to_string(),
            total_reward: player.total_reward(),
            average_reward: player.average_reward(),
            num_rounds: player.history().len(),
            last_policy: player.last_policy(),
            average_strategy: player.averaging().map(|a| a.average_strategy()),
            regrets: player.regretful().map(|r| r.regrets().to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn capabilities_show_up_only_when_present() {
        let mut rm = RegretMatcher::new("rm", 2);
        rm.update_history(vec![1.0, 0.0], 3.0);
        let stats = PlayerStats::from(&rm as &dyn Player);
        assert_eq!(stats.kind, "regret_matching");
        assert_eq!(stats.num_rounds, 1);
        assert_eq!(stats.regrets, Some(vec![0.0, 0.0]));
        let stats = PlayerStats::from(&UniformPlayer::new("u", 2) as &dyn Player);
        assert_eq!(stats.last_policy, vec![0.5, 0.5]);
        assert!(stats.average_strategy.is_none());
        assert!(serde_json::to_value(&stats).unwrap().get("regrets").is_none());
    }
}
