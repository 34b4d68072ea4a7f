use crate::*;

/// Chicken, also known as Hawk-Dove. Action 0 swerves, action 1 goes straight.
#[derive(Debug, Clone, PartialEq)]
pub struct Chicken {
    /// Value of winning.
    pub v: Utility,
    /// Cost of conflict.
    pub c: Utility,
    inner: MatrixGame,
}

impl Chicken {
    pub fn new(v: Utility, c: Utility) -> Self {
        let inner = MatrixGame::new(
            vec![vec![v / 2.0, v], vec![v - c, 0.0]],
            vec![vec![v / 2.0, v - c], vec![v, 0.0]],
        )
        .expect("2x2 matrices");
        Self { v, c, inner }
    }
}

impl Default for Chicken {
    fn default() -> Self {
        Self::new(2.0, 1.0)
    }
}

impl Game for Chicken {
    fn payoffs(&self, actions: &[Action]) -> Result<Vec<Utility>, GameError> {
        self.inner.payoffs(actions)
    }
    fn num_actions(&self) -> usize {
        self.inner.num_actions()
    }
    fn num_players(&self) -> usize {
        self.inner.num_players()
    }
    fn matrix(&self, player: usize) -> Option<&[Vec<Utility>]> {
        self.inner.matrix(player)
    }
}

impl std::fmt::Display for Chicken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chicken(V={}, C={})", self.v, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_payoffs() {
        let game = Chicken::default();
        assert_eq!(game.payoffs(&[0, 0]).unwrap(), vec![1.0, 1.0]);
        assert_eq!(game.payoffs(&[0, 1]).unwrap(), vec![2.0, 1.0]);
        assert_eq!(game.payoffs(&[1, 0]).unwrap(), vec![1.0, 2.0]);
        assert_eq!(game.payoffs(&[1, 1]).unwrap(), vec![0.0, 0.0]);
    }
}
