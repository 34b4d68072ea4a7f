use crate::*;

/// Symmetric four-action coordination game.
///
/// Actions 0 and 1 pay both players 5 when matched. Actions 2 and 3 form a
/// matching-pennies subgame in which the two players pull in opposite
/// directions. Crossing between the halves pays 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordination(MatrixGame);

impl Default for Coordination {
    fn default() -> Self {
        Self(
            MatrixGame::new(
                vec![
                    vec![5.0, 0.0, 1.0, 1.0],
                    vec![0.0, 5.0, 1.0, 1.0],
                    vec![1.0, 1.0, 2.0, 0.0],
                    vec![1.0, 1.0, 0.0, 2.0],
                ],
                vec![
                    vec![5.0, 0.0, 1.0, 1.0],
                    vec![0.0, 5.0, 1.0, 1.0],
                    vec![1.0, 1.0, 0.0, 2.0],
                    vec![1.0, 1.0, 2.0, 0.0],
                ],
            )
            .expect("4x4 matrices"),
        )
    }
}

impl Game for Coordination {
    fn payoffs(&self, actions: &[Action]) -> Result<Vec<Utility>, GameError> {
        self.0.payoffs(actions)
    }
    fn num_actions(&self) -> usize {
        self.0.num_actions()
    }
    fn num_players(&self) -> usize {
        self.0.num_players()
    }
    fn matrix(&self, player: usize) -> Option<&[Vec<Utility>]> {
        self.0.matrix(player)
    }
}

impl std::fmt::Display for Coordination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coordination({}x{})", self.0.rows(), self.0.cols())
    }
}
