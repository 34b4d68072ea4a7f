use crate::*;
use serde::Deserialize;

/// Where a [`Correction`] currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Initial request not yet issued.
    Awaiting,
    /// A raw reply waiting to be checked.
    Validating(String),
    /// The last reply (if any) was rejected with this error.
    Correcting {
        error: String,
        previous: Option<String>,
    },
    Done(Outcome),
}

/// Terminal result of a correction run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(Decision),
    /// Attempts ran out. Carries the last error.
    Exhausted(String),
}

/// Bounded self-correction against an [`Oracle`].
///
/// Issues one initial request, validates the reply, and on failure feeds
/// the error and the offending reply back, at most `max_attempts` times.
/// Every oracle failure, including a panic, is folded into a validation
/// error; nothing escapes [`Correction::run`].
#[derive(Debug, Clone)]
pub struct Correction {
    prompt: String,
    num_actions: usize,
    use_cot: bool,
    max_attempts: usize,
    attempt: usize,
    phase: Phase,
}

impl Correction {
    pub fn new(prompt: String, num_actions: usize, use_cot: bool, max_attempts: usize) -> Self {
        Self {
            prompt,
            num_actions,
            use_cot,
            max_attempts,
            attempt: 0,
            phase: Phase::Awaiting,
        }
    }
    pub fn phase(&self) -> &Phase {
        &self.phase
    }
    /// Correction requests issued so far.
    pub fn attempts(&self) -> usize {
        self.attempt
    }
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// Advances by exactly one transition. A no-op once done.
    pub fn step(&mut self, oracle: &mut dyn Oracle) {
        let phase = std::mem::replace(&mut self.phase, Phase::Awaiting);
        self.phase = match phase {
            Phase::Awaiting => match ask(oracle, &self.initial()) {
                Ok(raw) => Phase::Validating(raw),
                Err(e) => Phase::Correcting {
                    error: format!("Initial generation error: {}", e),
                    previous: None,
                },
            },
            Phase::Validating(raw) => match validate(&raw, self.num_actions, self.use_cot) {
                Ok(decision) => Phase::Done(Outcome::Accepted(decision)),
                Err(error) => Phase::Correcting {
                    error,
                    previous: Some(raw),
                },
            },
            Phase::Correcting { error, .. } if self.attempt >= self.max_attempts => {
                Phase::Done(Outcome::Exhausted(error))
            }
            Phase::Correcting { error, previous } => {
                self.attempt += 1;
                log::debug!(
                    "[correction] attempt {}/{}: {}",
                    self.attempt,
                    self.max_attempts,
                    error
                );
                let request = self.correction(&error, previous.as_deref());
                match ask(oracle, &request) {
                    Ok(raw) => Phase::Validating(raw),
                    Err(e) => Phase::Correcting {
                        error: format!("Correction error: {}", e),
                        previous,
                    },
                }
            }
            done @ Phase::Done(_) => done,
        };
    }

    /// Steps until done. Returns the outcome and the correction count.
    pub fn run(mut self, oracle: &mut dyn Oracle) -> (Outcome, usize) {
        loop {
            if let Phase::Done(outcome) = self.phase {
                return (outcome, self.attempt);
            }
            self.step(oracle);
        }
    }

    fn initial(&self) -> Request {
        Request {
            system: contract(self.num_actions, self.use_cot),
            prompt: self.prompt.clone(),
            attempt: 0,
        }
    }

    fn correction(&self, error: &str, previous: Option<&str>) -> Request {
        let system = format!(
            "You are a strategic game-playing agent. Your previous response had errors.\n\n\
             Error: {}\n\n\
             Previous response: {}\n\n\
             Please correct your response.\n{}\n\n\
             Requirements:\n\
             - Policy must be exactly {} elements long\n\
             - Policy must be one-hot: exactly one 1, all others 0\n\
             - All policy values must be either 0 or 1",
            error,
            previous.unwrap_or("none"),
            contract(self.num_actions, self.use_cot),
            self.num_actions,
        );
        Request {
            system,
            prompt: self.prompt.clone(),
            attempt: self.attempt,
        }
    }
}

/// Output contract the oracle is held to.
fn contract(num_actions: usize, use_cot: bool) -> String {
    let example = one_hot(num_actions, num_actions.saturating_sub(1))
        .iter()
        .map(|p| format!("{}", *p as u8))
        .collect::<Vec<_>>()
        .join(", ");
    match use_cot {
        true => format!(
            "You are a strategic game-playing agent. Respond with a JSON object of the form \
             {{\"chain_of_thought\": \"your reasoning\", \"policy\": [{}]}}. \
             The policy must be a one-hot vector of length {}.",
            example, num_actions
        ),
        false => format!(
            "You are a strategic game-playing agent. Respond with a JSON object of the form \
             {{\"policy\": [{}]}}. The policy must be a one-hot vector of length {}.",
            example, num_actions
        ),
    }
}

/// Queries the oracle with panics and errors flattened into text.
fn ask(oracle: &mut dyn Oracle, request: &Request) -> Result<String, String> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| oracle.query(request)))
        .map_err(|_| "oracle panicked".to_string())?
        .map_err(|e| e.to_string())
}

#[derive(Debug, Deserialize)]
struct Reply {
    policy: Vec<Probability>,
    #[serde(default)]
    chain_of_thought: Option<String>,
}

/// Checks a raw reply against the one-hot decision contract.
///
/// The first `{` through the last `}` is parsed as JSON, so replies wrapped
/// in prose or code fences still validate.
pub fn validate(raw: &str, num_actions: usize, use_cot: bool) -> Result<Decision, String> {
    let json = raw
        .find('{')
        .zip(raw.rfind('}'))
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &raw[start..=end])
        .ok_or_else(|| "Validation error: no JSON object in response".to_string())?;
    let reply = serde_json::from_str::<Reply>(json).map_err(|e| format!("Validation error: {}", e))?;
    let policy = reply.policy;
    if policy.len() != num_actions {
        return Err(format!(
            "Value error: Policy length {} does not match num_actions {}",
            policy.len(),
            num_actions
        ));
    }
    if policy.iter().any(|p| *p != 0.0 && *p != 1.0) {
        return Err("Value error: Policy must contain only 0s and 1s".to_string());
    }
    let sum = policy.iter().sum::<Probability>();
    if sum != 1.0 {
        return Err(format!(
            "Value error: Policy must be one-hot (sum=1), got sum={}",
            sum
        ));
    }
    let chain_of_thought = use_cot.then(|| {
        reply
            .chain_of_thought
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| EMPTY_RATIONALE.to_string())
    });
    Ok(Decision {
        policy,
        chain_of_thought,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_one_hot() {
        let decision = validate(r#"{"policy": [0, 1]}"#, 2, false).unwrap();
        assert_eq!(decision.policy, vec![0.0, 1.0]);
        assert_eq!(decision.chain_of_thought, None);
    }
    #[test]
    fn validate_digs_json_out_of_prose() {
        let raw = "Sure!\n```json\n{\"policy\": [1, 0], \"chain_of_thought\": \"cooperate\"}\n```";
        let decision = validate(raw, 2, true).unwrap();
        assert_eq!(decision.chain_of_thought.as_deref(), Some("cooperate"));
    }
    #[test]
    fn validate_fills_missing_rationale() {
        let decision = validate(r#"{"policy": [1, 0]}"#, 2, true).unwrap();
        assert_eq!(decision.chain_of_thought.as_deref(), Some(EMPTY_RATIONALE));
    }
    #[test]
    fn validate_rejects_each_violation() {
        assert!(validate("no json here", 2, false).unwrap_err().contains("no JSON"));
        assert!(validate(r#"{"policy": [1, 0, 0]}"#, 2, false)
            .unwrap_err()
            .contains("does not match num_actions 2"));
        assert!(validate(r#"{"policy": [0.5, 0.5]}"#, 2, false)
            .unwrap_err()
            .contains("only 0s and 1s"));
        assert!(validate(r#"{"policy": [1, 1]}"#, 2, false)
            .unwrap_err()
            .contains("sum=2"));
        assert!(validate(r#"{"action": 1}"#, 2, false)
            .unwrap_err()
            .starts_with("Validation error"));
    }
    #[test]
    fn accepts_first_valid_reply() {
        let mut oracle = ScriptedOracle::new([r#"{"policy": [1, 0]}"#]);
        let (outcome, attempts) = Correction::new("ctx".into(), 2, false, 3).run(&mut oracle);
        assert_eq!(outcome, Outcome::Accepted(Decision::new(vec![1.0, 0.0])));
        assert_eq!(attempts, 0);
        assert_eq!(oracle.transcript().lock().unwrap().len(), 1);
    }
    #[test]
    fn feeds_error_and_previous_reply_back() {
        let mut oracle = ScriptedOracle::new([r#"{"policy": [1, 1]}"#, r#"{"policy": [0, 1]}"#]);
        let (outcome, attempts) = Correction::new("ctx".into(), 2, false, 3).run(&mut oracle);
        assert_eq!(outcome, Outcome::Accepted(Decision::new(vec![0.0, 1.0])));
        assert_eq!(attempts, 1);
        let transcript = oracle.transcript();
        let requests = transcript.lock().unwrap();
        assert!(!requests[0].is_correction());
        assert_eq!(requests[1].attempt, 1);
        assert!(requests[1].system.contains("sum=2"));
        assert!(requests[1].system.contains(r#"{"policy": [1, 1]}"#));
        assert_eq!(requests[1].prompt, "ctx");
    }
    #[test]
    fn exhausts_after_max_attempts() {
        let mut oracle = ScriptedOracle::new(["garbage"]);
        let (outcome, attempts) = Correction::new("ctx".into(), 2, false, 3).run(&mut oracle);
        assert!(matches!(outcome, Outcome::Exhausted(_)));
        assert_eq!(attempts, 3);
        assert_eq!(oracle.transcript().lock().unwrap().len(), 4);
    }
    #[test]
    fn zero_budget_means_single_request() {
        let mut oracle = ScriptedOracle::new(["garbage"]);
        let (outcome, attempts) = Correction::new("ctx".into(), 2, false, 0).run(&mut oracle);
        assert!(matches!(outcome, Outcome::Exhausted(_)));
        assert_eq!(attempts, 0);
        assert_eq!(oracle.transcript().lock().unwrap().len(), 1);
    }
    #[test]
    fn backend_failures_are_recoverable() {
        let mut oracle = ScriptedOracle::default()
            .then_fail("connection refused")
            .then_reply(r#"{"policy": [0, 1]}"#);
        let (outcome, attempts) = Correction::new("ctx".into(), 2, false, 3).run(&mut oracle);
        assert!(matches!(outcome, Outcome::Accepted(_)));
        assert_eq!(attempts, 1);
        let transcript = oracle.transcript();
        let requests = transcript.lock().unwrap();
        assert!(requests[1].system.contains("Initial generation error: connection refused"));
    }
    #[test]
    fn panicking_backend_is_contained() {
        let mut oracle = |_: &Request| -> anyhow::Result<String> { panic!("backend crashed") };
        let (outcome, attempts) = Correction::new("ctx".into(), 2, false, 1).run(&mut oracle);
        assert_eq!(outcome, Outcome::Exhausted("Correction error: oracle panicked".into()));
        assert_eq!(attempts, 1);
    }
    #[test]
    fn steps_through_phases() {
        let mut oracle = ScriptedOracle::new(["bad", r#"{"policy": [1, 0]}"#]);
        let mut correction = Correction::new("ctx".into(), 2, false, 3);
        assert_eq!(correction.phase(), &Phase::Awaiting);
        correction.step(&mut oracle);
        assert_eq!(correction.phase(), &Phase::Validating("bad".into()));
        correction.step(&mut oracle);
        assert!(matches!(correction.phase(), Phase::Correcting { .. }));
        correction.step(&mut oracle);
        assert!(matches!(correction.phase(), Phase::Validating(_)));
        correction.step(&mut oracle);
        assert!(correction.is_done());
        assert_eq!(correction.attempts(), 1);
    }
}
