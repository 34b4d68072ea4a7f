use crate::*;

/// Payoff logic for a simultaneous-move game.
///
/// Implementations are immutable once constructed, so a single instance
/// can be shared across independently running experiments.
pub trait Game: Send + Sync + std::fmt::Display {
    /// Rewards for each player, in player order, given one action per player.
    fn payoffs(&self, actions: &[Action]) -> Result<Vec<Utility>, GameError>;
    /// Size of every player's action space.
    fn num_actions(&self) -> usize;
    /// Number of seats at the table.
    fn num_players(&self) -> usize;

    /// Payoff matrix for one player, when the game is tabular.
    fn matrix(&self, _: usize) -> Option<&[Vec<Utility>]> {
        None
    }

    /// What `seat` would have earned with each alternative action,
    /// holding everyone else's realized action fixed.
    fn counterfactuals(&self, actions: &[Action], seat: usize) -> Result<Vec<Utility>, GameError> {
        if seat >= actions.len() {
            return Err(GameError::ArityMismatch {
                expected: self.num_players(),
                actual: actions.len(),
            });
        }
        let mut profile = actions.to_vec();
        (0..self.num_actions())
            .map(|alternative| {
                profile[seat] = alternative;
                self.payoffs(&profile).map(|rewards| rewards[seat])
            })
            .collect()
    }
}
