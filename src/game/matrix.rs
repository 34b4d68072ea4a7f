use crate::*;

/// Two-player game given by one payoff matrix per player.
///
/// Entry `[i][j]` is the reward when player 1 plays `i` and player 2 plays `j`.
/// Both matrices share one square shape, checked once at construction,
/// since every player draws from the same action space.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixGame {
    r1: Vec<Vec<Utility>>,
    r2: Vec<Vec<Utility>>,
}

impl MatrixGame {
    pub fn new(r1: Vec<Vec<Utility>>, r2: Vec<Vec<Utility>>) -> Result<Self, GameError> {
        let cols = |m: &[Vec<Utility>]| m.first().map(Vec::len).unwrap_or(0);
        if r1.len() != r2.len() || cols(&r1) != cols(&r2) {
            return Err(GameError::ShapeMismatch {
                rows: (r1.len(), r2.len()),
                cols: (cols(&r1), cols(&r2)),
            });
        }
        if r1.is_empty() || cols(&r1) == 0 {
            return Err(GameError::RaggedMatrix("empty payoff matrix".into()));
        }
        if r1.len() != cols(&r1) {
            return Err(GameError::RaggedMatrix(format!(
                "players share one action space, got {}x{}",
                r1.len(),
                cols(&r1)
            )));
        }
        for (p, m) in [&r1, &r2].into_iter().enumerate() {
            if let Some(row) = m.iter().position(|row| row.len() != cols(m)) {
                return Err(GameError::RaggedMatrix(format!(
                    "player {} row {} has {} columns, expected {}",
                    p + 1,
                    row,
                    m[row].len(),
                    cols(m)
                )));
            }
        }
        Ok(Self { r1, r2 })
    }
    pub fn rows(&self) -> usize {
        self.r1.len()
    }
    pub fn cols(&self) -> usize {
        self.r1[0].len()
    }
}

impl Game for MatrixGame {
    fn payoffs(&self, actions: &[Action]) -> Result<Vec<Utility>, GameError> {
        match actions {
            &[a1, _] if a1 >= self.rows() => Err(GameError::ActionOutOfBounds {
                action: a1,
                bound: self.rows(),
            }),
            &[_, a2] if a2 >= self.cols() => Err(GameError::ActionOutOfBounds {
                action: a2,
                bound: self.cols(),
            }),
            &[a1, a2] => Ok(vec![self.r1[a1][a2], self.r2[a1][a2]]),
            _ => Err(GameError::ArityMismatch {
                expected: 2,
                actual: actions.len(),
            }),
        }
    }
    fn num_actions(&self) -> usize {
        self.rows()
    }
    fn num_players(&self) -> usize {
        2
    }
    fn matrix(&self, player: usize) -> Option<&[Vec<Utility>]> {
        match player {
            0 => Some(&self.r1),
            1 => Some(&self.r2),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatrixGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MatrixGame({}x{})", self.rows(), self.cols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn game() -> MatrixGame {
        MatrixGame::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0], vec![7.0, 8.0]],
        )
        .unwrap()
    }
    #[test]
    fn payoffs_match_entries() {
        let game = game();
        for a in 0..2 {
            for b in 0..2 {
                let payoffs = game.payoffs(&[a, b]).unwrap();
                assert_eq!(payoffs[0], game.matrix(0).unwrap()[a][b]);
                assert_eq!(payoffs[1], game.matrix(1).unwrap()[a][b]);
                assert_eq!(payoffs, game.payoffs(&[a, b]).unwrap());
            }
        }
    }
    #[test]
    fn rejects_out_of_bounds() {
        assert_eq!(
            game().payoffs(&[2, 0]),
            Err(GameError::ActionOutOfBounds {
                action: 2,
                bound: 2
            })
        );
        assert!(game().payoffs(&[0, 5]).is_err());
    }
    #[test]
    fn rejects_wrong_arity() {
        assert!(game().payoffs(&[0]).is_err());
        assert!(game().payoffs(&[0, 0, 0]).is_err());
    }
    #[test]
    fn rejects_shape_mismatch() {
        let r1 = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let r2 = vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0]];
        assert!(matches!(
            MatrixGame::new(r1.clone(), r2),
            Err(GameError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            MatrixGame::new(r1, vec![vec![1.0, 2.0]]),
            Err(GameError::ShapeMismatch { .. })
        ));
    }
    #[test]
    fn rejects_ragged_rows() {
        let r1 = vec![vec![1.0, 2.0], vec![3.0]];
        let r2 = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert!(matches!(
            MatrixGame::new(r1, r2),
            Err(GameError::RaggedMatrix(_))
        ));
    }
}
