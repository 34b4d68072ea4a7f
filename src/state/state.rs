use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Tracks the current round, lifecycle, history and event log of one game.
///
/// Everything here is append-only. After construction the only mutations
/// are appending rounds and events, advancing `current_round`, and moving
/// `status` forward. `round_history.len() == current_round` whenever a
/// round is not in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    current_round: usize,
    num_rounds: usize,
    players: Vec<String>,
    sequential: bool,
    round_history: Vec<Round>,
    event_log: Vec<Event>,
    status: Status,
}

impl GameState {
    pub fn new(num_rounds: usize, players: Vec<String>, sequential: bool) -> Self {
        Self {
            current_round: 0,
            num_rounds,
            players,
            sequential,
            round_history: Vec::new(),
            event_log: Vec::new(),
            status: Status::Initialized,
        }
    }
    pub fn current_round(&self) -> usize {
        self.current_round
    }
    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }
    pub fn players(&self) -> &[String] {
        &self.players
    }
    pub fn sequential(&self) -> bool {
        self.sequential
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn round_history(&self) -> &[Round] {
        &self.round_history
    }
    pub fn event_log(&self) -> &[Event] {
        &self.event_log
    }
    pub fn last_round(&self) -> Option<&Round> {
        self.round_history.last()
    }
    /// True once every scheduled round has been played.
    pub fn is_complete(&self) -> bool {
        self.current_round >= self.num_rounds
    }
}

impl GameState {
    /// Rounds with the given number, or all of them.
    pub fn rounds(&self, round: Option<usize>) -> Vec<&Round> {
        self.round_history
            .iter()
            .filter(|r| round.map_or(true, |n| r.round == n))
            .collect()
    }
    /// Events of one kind, in the order they were recorded.
    pub fn events_of(&self, kind: EventKind) -> Vec<&Event> {
        self.event_log.iter().filter(|e| e.event == kind).collect()
    }
}

impl GameState {
    /// Appends an event stamped with the current round and status.
    pub fn record(&mut self, kind: EventKind, details: serde_json::Value) {
        let event = Event::new(self.current_round, kind, details, self.status);
        log::trace!("[state] {} round {}", kind, self.current_round);
        self.event_log.push(event);
    }
    /// Moves the lifecycle forward.
    pub fn transition(&mut self, to: Status) -> Result<(), GameError> {
        self.status = self.status.advance(to)?;
        Ok(())
    }
    /// Opens the next round and marks the game running.
    pub(crate) fn open_round(&mut self) -> Result<usize, GameError> {
        self.transition(Status::Running)?;
        self.current_round += 1;
        Ok(self.current_round)
    }
    /// Closes the round in flight with its record.
    pub(crate) fn close_round(&mut self, round: Round) {
        debug_assert_eq!(round.round, self.current_round);
        self.round_history.push(round);
    }
    /// Abandons the round in flight. The counter only counts completed rounds.
    pub(crate) fn abort_round(&mut self) {
        debug_assert_eq!(self.round_history.len() + 1, self.current_round);
        self.current_round -= 1;
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GameState(round={}/{}, status={}, players={:?})",
            self.current_round, self.num_rounds, self.status, self.players
        )
    }
}
