use crate::*;

/// Opens with a fixed action, then repeats whatever the opponent played last.
///
/// Opponent actions are read from the public round history, once per
/// completed round, so replaying a briefing never double-counts.
#[derive(Debug, Clone)]
pub struct TitForTat {
    name: String,
    num_actions: usize,
    initial: Action,
    observed: Vec<Action>,
    seen: usize,
    ledger: Ledger,
}

impl TitForTat {
    pub fn new(name: &str, num_actions: usize, initial: Action) -> Result<Self, GameError> {
        if initial >= num_actions {
            return Err(GameError::InvalidParameter(format!(
                "initial action {} outside {} actions",
                initial, num_actions
            )));
        }
        Ok(Self {
            name: name.to_string(),
            num_actions,
            initial,
            observed: Vec::new(),
            seen: 0,
            ledger: Ledger::default(),
        })
    }

    fn observe(&mut self, state: &GameState) {
        for round in state.round_history().iter().skip(self.seen) {
            if let Some(action) = round.opponent_action(&self.name) {
                self.observed.push(action);
            }
        }
        self.seen = state.round_history().len();
    }

    fn next(&self) -> Action {
        self.observed
            .last()
            .copied()
            .filter(|a| *a < self.num_actions)
            .unwrap_or(self.initial)
    }
}

impl Player for TitForTat {
    fn name(&self) -> &str {
        &self.name
    }
    fn num_actions(&self) -> usize {
        self.num_actions
    }
    fn kind(&self) -> &'static str {
        "tit_for_tat"
    }
    fn handle_message(&mut self, _: &Message, state: &GameState) -> Message {
        self.observe(state);
        let action = self.next();
        Message::decision(&self.name, Decision::new(one_hot(self.num_actions, action)))
    }
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
    fn supports(&self, players: usize) -> bool {
        players == 2
    }
    fn opponent_memory(&self) -> Option<&[Action]> {
        Some(&self.observed)
    }
}
