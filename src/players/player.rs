use crate::*;

/// A strategic agent.
///
/// The moderator talks to a player only through [`Player::handle_message`]
/// and [`Player::update_history`], plus the optional capabilities it
/// advertises. A player owns its own history and learning state.
pub trait Player: Send {
    /// Unique within an experiment.
    fn name(&self) -> &str;
    /// Must equal the game's action count.
    fn num_actions(&self) -> usize;
    /// Short variant label for reports.
    fn kind(&self) -> &'static str;
    /// Answers a private briefing with a policy on the `policy` channel.
    fn handle_message(&mut self, message: &Message, state: &GameState) -> Message;
    fn ledger(&self) -> &Ledger;
    fn ledger_mut(&mut self) -> &mut Ledger;

    /// Whether this variant can sit at a table of `players`.
    fn supports(&self, _players: usize) -> bool {
        true
    }
    fn regretful(&self) -> Option<&dyn RegretUpdatable> {
        None
    }
    fn regretful_mut(&mut self) -> Option<&mut dyn RegretUpdatable> {
        None
    }
    fn averaging(&self) -> Option<&dyn StrategyAveraging> {
        None
    }
    /// Opponent actions this player has observed, if it keeps them.
    fn opponent_memory(&self) -> Option<&[Action]> {
        None
    }

    /// Appends one round's outcome. Called exactly once per round.
    fn update_history(&mut self, policy: Policy, reward: Utility) {
        self.ledger_mut().push(policy, reward);
    }
    fn history(&self) -> &[(Policy, Utility)] {
        self.ledger().history()
    }
    fn total_reward(&self) -> Utility {
        self.ledger().total()
    }
    fn average_reward(&self) -> Utility {
        self.ledger().average()
    }
    /// Most recent policy, or uniform before the first round.
    fn last_policy(&self) -> Policy {
        self.ledger()
            .last_policy()
            .cloned()
            .unwrap_or_else(|| uniform(self.num_actions()))
    }
}

/// Learns from counterfactual payoffs after each round.
pub trait RegretUpdatable {
    /// `payoffs[a]` is what action `a` would have earned against the
    /// opponents' realized actions; `action` is what was actually played.
    fn update_regrets(&mut self, action: Action, payoffs: &[Utility]);
    fn regrets(&self) -> &[Utility];
}

/// Maintains a time-averaged strategy.
pub trait StrategyAveraging {
    fn average_strategy(&self) -> Policy;
}
