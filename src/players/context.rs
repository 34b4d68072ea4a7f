use crate::*;

/// Textual game context handed to an [`Oracle`].
///
/// Covers the player's own (policy, reward) history, a window of recent
/// public rounds, the action space, and the round counters.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    pub name: &'a str,
    pub briefing: &'a Briefing,
    pub recent: &'a [Round],
    pub use_cot: bool,
}

impl<'a> Context<'a> {
    pub fn new(name: &'a str, briefing: &'a Briefing, state: &'a GameState, window: usize) -> Self {
        let history = state.round_history();
        Self {
            name,
            briefing,
            recent: &history[history.len().saturating_sub(window)..],
            use_cot: false,
        }
    }
    pub fn with_cot(mut self, use_cot: bool) -> Self {
        self.use_cot = use_cot;
        self
    }

    pub fn render(&self) -> String {
        let n = self.briefing.game_info.num_actions;
        let mut lines = vec![
            format!("You are playing a repeated game as player {}.", self.name),
            format!(
                "You have {} actions available: {:?}.",
                n,
                (0..n).collect::<Vec<_>>()
            ),
            format!(
                "Current round: {} of {}.",
                self.briefing.round, self.briefing.total_rounds
            ),
        ];
        if !self.briefing.history.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "Your history of n_rounds: {}:",
                self.briefing.history.len()
            ));
            for (i, (policy, reward)) in self.briefing.history.iter().enumerate() {
                lines.push(format!(
                    "  Round {}: Policy {:?}, Reward {:.2}",
                    i + 1,
                    policy,
                    reward
                ));
            }
        }
        if !self.recent.is_empty() {
            lines.push(String::new());
            lines.push("Game history:".to_string());
            for round in self.recent {
                lines.push(format!(
                    "  Round {}: Actions {{{}}}, Rewards {{{}}}",
                    round.round,
                    round
                        .actions
                        .iter()
                        .map(|(p, a)| format!("{}={}", p, a))
                        .collect::<Vec<_>>()
                        .join(", "),
                    round
                        .rewards
                        .iter()
                        .map(|(p, r)| format!("{}={:.2}", p, r))
                        .collect::<Vec<_>>()
                        .join(", "),
                ));
            }
        }
        lines.push(String::new());
        lines.push(match self.use_cot {
            true => "Respond ONLY with a valid JSON object with keys 'policy' and 'chain_of_thought'."
                .to_string(),
            false => "Respond ONLY with a valid JSON object with key 'policy'.".to_string(),
        });
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn briefing(history: Vec<(Policy, Utility)>) -> Briefing {
        Briefing {
            round: history.len() + 1,
            history,
            total_rounds: 10,
            game_info: GameInfo {
                num_actions: 2,
                num_players: 2,
                sequential: false,
            },
        }
    }

    #[test]
    fn renders_counters_and_contract() {
        let state = GameState::new(10, vec!["a".into(), "b".into()], false);
        let briefing = briefing(vec![]);
        let text = Context::new("a", &briefing, &state, 3).render();
        assert!(text.contains("player a"));
        assert!(text.contains("2 actions available: [0, 1]"));
        assert!(text.contains("Current round: 1 of 10."));
        assert!(text.contains("key 'policy'"));
        assert!(!text.contains("Game history"));
    }
    #[test]
    fn renders_only_recent_window() {
        let mut state = GameState::new(10, vec!["a".into(), "b".into()], false);
        for n in 1..=5 {
            state.open_round().unwrap();
            state.close_round(Round {
                round: n,
                actions: BTreeMap::from([("a".to_string(), 0), ("b".to_string(), 1)]),
                rewards: BTreeMap::from([("a".to_string(), 0.0), ("b".to_string(), 5.0)]),
                ..Round::default()
            });
        }
        let briefing = briefing(vec![(vec![1.0, 0.0], 0.0); 5]);
        let context = Context::new("a", &briefing, &state, 3).with_cot(true);
        assert_eq!(context.recent.len(), 3);
        let text = context.render();
        assert!(!text.contains("  Round 2: Actions"));
        assert!(text.contains("  Round 5: Actions {a=0, b=1}, Rewards {a=0.00, b=5.00}"));
        assert!(text.contains("Your history of n_rounds: 5:"));
        assert!(text.contains("'chain_of_thought'"));
    }
}
