use crate::*;

/// Classic Prisoner's Dilemma. Action 0 cooperates, action 1 defects.
///
/// Requires `T > R > P > S` for the usual dilemma, but any values are
/// accepted so that degenerate variants can be studied.
#[derive(Debug, Clone, PartialEq)]
pub struct PrisonersDilemma {
    /// Temptation: defect while the other cooperates.
    pub t: Utility,
    /// Reward: both cooperate.
    pub r: Utility,
    /// Punishment: both defect.
    pub p: Utility,
    /// Sucker's payoff: cooperate while the other defects.
    pub s: Utility,
    inner: MatrixGame,
}

impl PrisonersDilemma {
    pub fn new(t: Utility, r: Utility, p: Utility, s: Utility) -> Self {
        let inner = MatrixGame::new(
            vec![vec![r, s], vec![t, p]], //
            vec![vec![r, t], vec![s, p]],
        )
        .expect("2x2 matrices");
        Self { t, r, p, s, inner }
    }
}

impl Default for PrisonersDilemma {
    fn default() -> Self {
        Self::new(5.0, 3.0, 1.0, 0.0)
    }
}

impl Game for PrisonersDilemma {
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

impl std::fmt::Display for PrisonersDilemma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PrisonersDilemma(T={}, R={}, P={}, S={})",
            self.t, self.r, self.p, self.s
        )
    }
}
