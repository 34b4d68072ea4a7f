use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::json;
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Runs the round protocol between one game and its players.
///
/// Owns the players and the [`GameState`]. Players only ever see a
/// private briefing and a read-only view of the state, and are only
/// mutated through [`Player::update_history`] and their advertised
/// capabilities.
pub struct Moderator {
    game: Arc<dyn Game>,
    players: Vec<Box<dyn Player>>,
    state: GameState,
    rng: SmallRng,
}

impl Moderator {
    /// Seats `players` in order. Every configuration problem surfaces here.
    pub fn new(
        game: Arc<dyn Game>,
        players: Vec<Box<dyn Player>>,
        state: GameState,
        seed: u64,
    ) -> Result<Self, GameError> {
        if players.len() != game.num_players() {
            return Err(GameError::PlayerCount {
                expected: game.num_players(),
                actual: players.len(),
            });
        }
        let mut names = HashSet::with_capacity(players.len());
        for player in players.iter() {
            if player.num_actions() != game.num_actions() {
                return Err(GameError::ActionSpace {
                    player: player.name().to_string(),
                    expected: game.num_actions(),
                    actual: player.num_actions(),
                });
            }
            if !player.supports(players.len()) {
                return Err(GameError::UnsupportedRoster {
                    player: player.name().to_string(),
                    players: players.len(),
                });
            }
            if !names.insert(player.name().to_string()) {
                return Err(GameError::DuplicatePlayer(player.name().to_string()));
            }
        }
        let seated = players.iter().map(|p| p.name().to_string()).collect::<Vec<_>>();
        if seated != state.players() {
            return Err(GameError::RosterMismatch {
                state: state.players().to_vec(),
                players: seated,
            });
        }
        log::debug!("[moderator] seated {:?} at {}", seated, game);
        Ok(Self {
            game,
            players,
            state,
            rng: SmallRng::seed_from_u64(seed),
        })
    }
    pub fn game(&self) -> &dyn Game {
        self.game.as_ref()
    }
    pub fn players(&self) -> &[Box<dyn Player>] {
        &self.players
    }
    pub fn player(&self, name: &str) -> Option<&dyn Player> {
        self.players
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn player_stats(&self) -> BTreeMap<String, PlayerStats> {
        self.players
            .iter()
            .map(|p| (p.name().to_string(), PlayerStats::from(p.as_ref())))
            .collect()
    }
    /// Appends an experiment-level event.
    pub fn record(&mut self, kind: EventKind, details: serde_json::Value) {
        self.state.record(kind, details);
    }
    /// Moves the lifecycle forward.
    pub fn transition(&mut self, to: Status) -> Result<(), GameError> {
        self.state.transition(to)
    }
    pub fn into_parts(self) -> (GameState, Vec<Box<dyn Player>>) {
        (self.state, self.players)
    }
}

impl Moderator {
    /// Plays one round end to end.
    ///
    /// On error the round is abandoned: an abort event is logged, the
    /// round counter rewinds, and no player or history is touched, so
    /// `round_history.len() == current_round` still holds.
    pub fn play_round(&mut self) -> Result<(), GameError> {
        let round = self.state.open_round()?;
        self.state.record(EventKind::RoundStart, json!({ "round": round }));
        log::debug!("[moderator] round {} of {}", round, self.state.num_rounds());
        match self.resolve(round) {
            Ok(record) => {
                self.state.record(EventKind::RoundEnd, json!(record));
                self.state.close_round(record);
                Ok(())
            }
            Err(e) => {
                log::warn!("[moderator] aborting round {}: {}", round, e);
                self.state.record(
                    EventKind::RoundAborted,
                    json!({ "round": round, "error": e.to_string() }),
                );
                self.state.abort_round();
                Err(e)
            }
        }
    }

    /// Everything between `round_start` and `round_end`. Fallible steps all
    /// run before the first player is mutated.
    fn resolve(&mut self, round: usize) -> Result<Round, GameError> {
        let decisions = self.collect(round)?;
        let policies = decisions
            .iter()
            .enumerate()
            .map(|(seat, decision)| self.admit(seat, &decision.policy))
            .collect::<Vec<_>>();
        let actions = policies
            .iter()
            .enumerate()
            .map(|(seat, policy)| self.draw(seat, policy))
            .collect::<Vec<_>>();
        let rewards = self.game.payoffs(&actions)?;
        let details = json!({ "actions": self.keyed(&actions), "rewards": self.keyed(&rewards) });
        self.state.record(EventKind::PayoffsComputed, details);
        let counterfactuals = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, player)| match player.regretful() {
                Some(_) => self.game.counterfactuals(&actions, seat).map(Some),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.update_history(policies[seat].clone(), rewards[seat]);
            if let (Some(learner), Some(payoffs)) =
                (player.regretful_mut(), counterfactuals[seat].as_ref())
            {
                learner.update_regrets(actions[seat], payoffs);
            }
        }
        Ok(Round {
            round,
            actions: self.keyed(&actions),
            rewards: self.keyed(&rewards),
            policies: self.keyed(&policies),
            chain_of_thought: self
                .players
                .iter()
                .zip(decisions)
                .map(|(p, d)| (p.name().to_string(), d.chain_of_thought.unwrap_or_default()))
                .collect(),
        })
    }

    /// Briefs each player privately and gathers their decisions.
    /// Sequential games log each selection as it arrives; simultaneous
    /// games log selections and oracle fallbacks once everyone has
    /// answered, so every seat is queried against the same state.
    fn collect(&mut self, round: usize) -> Result<Vec<Decision>, GameError> {
        let sequential = self.state.sequential();
        let info = GameInfo {
            num_actions: self.game.num_actions(),
            num_players: self.game.num_players(),
            sequential,
        };
        let mut decisions = Vec::with_capacity(self.players.len());
        let mut fallbacks = Vec::with_capacity(self.players.len());
        for seat in 0..self.players.len() {
            let player = &mut self.players[seat];
            let briefing = Message::briefing(
                player.name(),
                Briefing {
                    history: player.history().to_vec(),
                    round,
                    total_rounds: self.state.num_rounds(),
                    game_info: info,
                },
            );
            let reply = player.handle_message(&briefing, &self.state);
            let decision = reply
                .decision_content()
                .cloned()
                .unwrap_or_else(|| Decision::new(Policy::new()));
            if decision.policy.len() != info.num_actions {
                return Err(GameError::PolicyShape {
                    player: player.name().to_string(),
                    expected: info.num_actions,
                    actual: decision.policy.len(),
                });
            }
            let fallback = reply.fallback().map(String::from);
            if sequential {
                self.fallen(seat, fallback.as_deref());
                self.selected(seat, &decision, sequential);
            }
            decisions.push(decision);
            fallbacks.push(fallback);
        }
        if !sequential {
            for (seat, decision) in decisions.iter().enumerate() {
                self.fallen(seat, fallbacks[seat].as_deref());
                self.selected(seat, decision, sequential);
            }
        }
        Ok(decisions)
    }

    fn fallen(&mut self, seat: usize, error: Option<&str>) {
        if let Some(error) = error {
            let details = json!({
                "player": self.players[seat].name(),
                "reason": "oracle",
                "error": error,
            });
            self.state.record(EventKind::PolicyFallback, details);
        }
    }

    fn selected(&mut self, seat: usize, decision: &Decision, sequential: bool) {
        let details = json!({
            "player": self.players[seat].name(),
            "policy": decision.policy,
            "chain_of_thought": decision.chain_of_thought,
            "sequential": sequential,
        });
        self.state.record(EventKind::PolicySelected, details);
    }

    /// The distribution actually played. Degenerate submissions become uniform.
    fn admit(&mut self, seat: usize, policy: &[Probability]) -> Policy {
        normalize(policy).unwrap_or_else(|| {
            let fallback = uniform(policy.len());
            let details = json!({
                "player": self.players[seat].name(),
                "reason": "degenerate",
                "policy": policy,
                "fallback": fallback,
            });
            log::warn!(
                "[moderator] {} submitted degenerate policy {:?}",
                self.players[seat].name(),
                policy
            );
            self.state.record(EventKind::PolicyFallback, details);
            fallback
        })
    }

    fn draw(&mut self, seat: usize, policy: &[Probability]) -> Action {
        let action = sample(policy, &mut self.rng);
        let details = json!({
            "player": self.players[seat].name(),
            "policy": policy,
            "action": action,
        });
        self.state.record(EventKind::ActionSampled, details);
        action
    }

    fn keyed<T: Clone>(&self, values: &[T]) -> BTreeMap<String, T> {
        self.players
            .iter()
            .map(|p| p.name().to_string())
            .zip(values.iter().cloned())
            .collect()
    }
}
