use crate::*;

/// Mixes uniformly every round. Sampling happens in the moderator.
#[derive(Debug, Clone)]
pub struct UniformPlayer {
    name: String,
    num_actions: usize,
    ledger: Ledger,
}

impl UniformPlayer {
    pub fn new(name: &str, num_actions: usize) -> Self {
        Self {
            name: name.to_string(),
            num_actions,
            ledger: Ledger::default(),
        }
    }
}

impl Player for UniformPlayer {
    fn name(&self) -> &str {
        &self.name
    }
    fn num_actions(&self) -> usize {
        self.num_actions
    }
    fn kind(&self) -> &'static str {
        "uniform"
    }
    fn handle_message(&mut self, _: &Message, _: &GameState) -> Message {
        Message::decision(&self.name, Decision::new(uniform(self.num_actions)))
    }
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn always_uniform() {
        let state = GameState::new(1, vec!["u".into(), "v".into()], false);
        let brief = Message::briefing(
            "u",
            Briefing {
                history: vec![],
                round: 1,
                total_rounds: 1,
                game_info: GameInfo {
                    num_actions: 4,
                    num_players: 2,
                    sequential: false,
                },
            },
        );
        let mut player = UniformPlayer::new("u", 4);
        let reply = player.handle_message(&brief, &state);
        assert_eq!(reply.policy(), Some(&vec![0.25; 4]));
        assert_eq!(reply.sender, "u");
        assert_eq!(reply.topic, Topic::policy());
    }
    #[test]
    fn last_policy_defaults_to_uniform() {
        let mut player = UniformPlayer::new("u", 2);
        assert_eq!(player.last_policy(), vec![0.5, 0.5]);
        player.update_history(vec![1.0, 0.0], 2.0);
        assert_eq!(player.last_policy(), vec![1.0, 0.0]);
        assert_eq!(player.average_reward(), 2.0);
    }
}
