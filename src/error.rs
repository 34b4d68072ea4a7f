use crate::*;

/// Everything that can go wrong while building or playing a game.
///
/// Configuration variants surface at construction, before any round runs.
/// `PolicyShape` aborts a single round. Degenerate-but-legal inputs never
/// show up here; they are absorbed and reflected in the event log instead.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Payoff matrices disagree in rows or columns.
    ShapeMismatch {
        rows: (usize, usize),
        cols: (usize, usize),
    },
    /// A payoff matrix has no rows, or ragged rows.
    RaggedMatrix(String),
    /// An action index exceeds the matrix dimension.
    ActionOutOfBounds { action: Action, bound: usize },
    /// A joint action profile with the wrong number of entries.
    ArityMismatch { expected: usize, actual: usize },
    /// Roster size differs from the game's player count.
    PlayerCount { expected: usize, actual: usize },
    /// A player's action space differs from the game's.
    ActionSpace {
        player: String,
        expected: usize,
        actual: usize,
    },
    /// A player variant that cannot sit at a table of this size.
    UnsupportedRoster { player: String, players: usize },
    /// Two players share a name.
    DuplicatePlayer(String),
    /// Player names differ from the names the state was built with.
    RosterMismatch {
        state: Vec<String>,
        players: Vec<String>,
    },
    /// A returned policy has the wrong number of entries.
    PolicyShape {
        player: String,
        expected: usize,
        actual: usize,
    },
    /// A lifecycle transition that skips or reverses a status.
    IllegalTransition { from: Status, to: Status },
    /// Export encoding outside json / csv / txt.
    UnsupportedFormat(String),
    /// A constructor argument outside its domain.
    InvalidParameter(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch { rows, cols } => write!(
                f,
                "payoff matrices disagree in shape: {}x{} vs {}x{}",
                rows.0, cols.0, rows.1, cols.1
            ),
            Self::RaggedMatrix(s) => write!(f, "malformed payoff matrix: {}", s),
            Self::ActionOutOfBounds { action, bound } => {
                write!(f, "action index {} out of bounds (< {})", action, bound)
            }
            Self::ArityMismatch { expected, actual } => {
                write!(f, "expected {} actions in profile, got {}", expected, actual)
            }
            Self::PlayerCount { expected, actual } => write!(
                f,
                "number of players ({}) doesn't match game ({})",
                actual, expected
            ),
            Self::ActionSpace {
                player,
                expected,
                actual,
            } => write!(
                f,
                "player {} has {} actions, but game requires {}",
                player, actual, expected
            ),
            Self::UnsupportedRoster { player, players } => {
                write!(f, "player {} cannot play a {}-player game", player, players)
            }
            Self::DuplicatePlayer(name) => write!(f, "duplicate player name: {}", name),
            Self::RosterMismatch { state, players } => write!(
                f,
                "players {:?} don't match game state players {:?}",
                players, state
            ),
            Self::PolicyShape {
                player,
                expected,
                actual,
            } => write!(
                f,
                "policy length {} from {} doesn't match game actions {}",
                actual, player, expected
            ),
            Self::IllegalTransition { from, to } => {
                write!(f, "illegal status transition: {} -> {}", from, to)
            }
            Self::UnsupportedFormat(s) => write!(f, "unsupported format: {}", s),
            Self::InvalidParameter(s) => write!(f, "invalid parameter: {}", s),
        }
    }
}

impl std::error::Error for GameError {}

impl GameError {
    /// Configuration errors abort before any round is played.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::ActionOutOfBounds { .. }
                | Self::ArityMismatch { .. }
                | Self::PolicyShape { .. }
                | Self::IllegalTransition { .. }
        )
    }
}
