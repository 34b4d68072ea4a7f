use crate::*;

/// Regret matching.
///
/// Keeps one cumulative regret per action. Each round it plays the positive
/// part of its regrets, normalized, or uniform when nothing is positive.
/// Every policy it emits is also summed into a time-averaged strategy.
#[derive(Debug, Clone)]
pub struct RegretMatcher {
    name: String,
    num_actions: usize,
    learning_rate: Utility,
    regrets: Vec<Utility>,
    strategy_sum: Vec<Probability>,
    ledger: Ledger,
}

impl RegretMatcher {
    pub fn new(name: &str, num_actions: usize) -> Self {
        Self {
            name: name.to_string(),
            num_actions,
            learning_rate: LEARNING_RATE,
            regrets: vec![0.0; num_actions],
            strategy_sum: vec![0.0; num_actions],
            ledger: Ledger::default(),
        }
    }
    pub fn with_learning_rate(mut self, learning_rate: Utility) -> Result<Self, GameError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(GameError::InvalidParameter(format!(
                "learning rate must be positive, got {}",
                learning_rate
            )));
        }
        self.learning_rate = learning_rate;
        Ok(self)
    }
    pub fn learning_rate(&self) -> Utility {
        self.learning_rate
    }

    /// Current strategy from positive regrets.
    pub fn strategy(&self) -> Policy {
        normalized(self.regrets.iter().map(|r| r.max(0.0)), self.num_actions)
    }
}

/// Normalizes non-negative weights, or falls back to uniform if they sum to zero.
fn normalized(weights: impl Iterator<Item = Utility>, n: usize) -> Policy {
    let weights = weights.collect::<Vec<_>>();
    let sum = weights.iter().sum::<Utility>();
    match sum > 0.0 {
        true => weights.into_iter().map(|w| w / sum).collect(),
        false => uniform(n),
    }
}

impl Player for RegretMatcher {
    fn name(&self) -> &str {
        &self.name
    }
    fn num_actions(&self) -> usize {
        self.num_actions
    }
    fn kind(&self) -> &'static str {
        "regret_matching"
    }
    fn handle_message(&mut self, _: &Message, _: &GameState) -> Message {
        let strategy = self.strategy();
        self.strategy_sum
            .iter_mut()
            .zip(strategy.iter())
            .for_each(|(sum, p)| *sum += p);
        Message::decision(&self.name, Decision::new(strategy))
    }
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
    fn regretful(&self) -> Option<&dyn RegretUpdatable> {
        Some(self)
    }
    fn regretful_mut(&mut self) -> Option<&mut dyn RegretUpdatable> {
        Some(self)
    }
    fn averaging(&self) -> Option<&dyn StrategyAveraging> {
        Some(self)
    }
}

impl RegretUpdatable for RegretMatcher {
    /// `regret[a] += rate * (payoffs[a] - payoffs[action])`
    fn update_regrets(&mut self, action: Action, payoffs: &[Utility]) {
        if payoffs.len() != self.num_actions || action >= self.num_actions {
            log::warn!(
                "[regret] {} ignoring update: {} payoffs, action {}, {} actions",
                self.name,
                payoffs.len(),
                action,
                self.num_actions
            );
            return;
        }
        let realized = payoffs[action];
        self.regrets
            .iter_mut()
            .zip(payoffs.iter())
            .for_each(|(regret, payoff)| *regret += self.learning_rate * (payoff - realized));
    }
    fn regrets(&self) -> &[Utility] {
        &self.regrets
    }
}

impl StrategyAveraging for RegretMatcher {
    fn average_strategy(&self) -> Policy {
        normalized(self.strategy_sum.iter().copied(), self.num_actions)
    }
}
