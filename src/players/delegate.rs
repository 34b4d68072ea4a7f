use crate::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Delegates each decision to an external [`Oracle`].
///
/// Every briefing is rendered into a [`Context`], sent through a bounded
/// [`Correction`] run, and answered with the accepted one-hot policy. If
/// the oracle never produces a valid decision, a uniformly random one-hot
/// policy is played instead and the reply is marked as a fallback.
pub struct DelegatePlayer {
    name: String,
    num_actions: usize,
    oracle: Box<dyn Oracle>,
    use_cot: bool,
    max_attempts: usize,
    window: usize,
    rng: SmallRng,
    prompts: Vec<String>,
    fallbacks: usize,
    ledger: Ledger,
}

impl DelegatePlayer {
    pub fn new(
        name: &str,
        num_actions: usize,
        oracle: impl Oracle + 'static,
        seed: u64,
    ) -> Result<Self, GameError> {
        if num_actions == 0 {
            return Err(GameError::InvalidParameter(format!(
                "{} needs at least one action",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            num_actions,
            oracle: Box::new(oracle),
            use_cot: false,
            max_attempts: MAX_CORRECTION_ATTEMPTS,
            window: HISTORY_WINDOW,
            rng: SmallRng::seed_from_u64(seed),
            prompts: Vec::new(),
            fallbacks: 0,
            ledger: Ledger::default(),
        })
    }
    /// Ask the oracle for a rationale alongside each decision.
    pub fn with_cot(mut self, use_cot: bool) -> Self {
        self.use_cot = use_cot;
        self
    }
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
    /// Number of recent public rounds rendered into each context.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
    pub fn use_cot(&self) -> bool {
        self.use_cot
    }
    /// Every context sent so far, one per decision.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
    /// Decisions that had to be replaced by a random one-hot policy.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// The briefing carried by `message`, or one rebuilt from our own records.
    fn briefing(&self, message: &Message, state: &GameState) -> Briefing {
        message.briefing_content().cloned().unwrap_or_else(|| Briefing {
            history: self.ledger.history().to_vec(),
            round: state.current_round(),
            total_rounds: state.num_rounds(),
            game_info: GameInfo {
                num_actions: self.num_actions,
                num_players: state.players().len(),
                sequential: state.sequential(),
            },
        })
    }
}

impl Player for DelegatePlayer {
    fn name(&self) -> &str {
        &self.name
    }
    fn num_actions(&self) -> usize {
        self.num_actions
    }
    fn kind(&self) -> &'static str {
        "delegate"
    }
    fn handle_message(&mut self, message: &Message, state: &GameState) -> Message {
        let briefing = self.briefing(message, state);
        let prompt = Context::new(&self.name, &briefing, state, self.window)
            .with_cot(self.use_cot)
            .render();
        self.prompts.push(prompt.clone());
        let correction = Correction::new(prompt, self.num_actions, self.use_cot, self.max_attempts);
        match correction.run(self.oracle.as_mut()) {
            (Outcome::Accepted(decision), attempts) => {
                log::debug!("[delegate] {} accepted after {} corrections", self.name, attempts);
                Message::decision(&self.name, decision).with_metadata("attempts", attempts)
            }
            (Outcome::Exhausted(error), attempts) => {
                self.fallbacks += 1;
                log::warn!(
                    "[delegate] {} falling back to random action after {} corrections: {}",
                    self.name,
                    attempts,
                    error
                );
                let action = self.rng.random_range(0..self.num_actions);
                let decision = Decision::with_rationale(one_hot(self.num_actions, action), FALLBACK_RATIONALE);
                Message::decision(&self.name, decision)
                    .with_metadata("attempts", attempts)
                    .with_fallback(&error)
            }
        }
    }
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
}
