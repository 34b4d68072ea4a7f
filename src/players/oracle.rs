use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

/// One call to an external decision backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// Output contract, plus the error and previous reply on corrections.
    pub system: String,
    /// Rendered game context.
    pub prompt: String,
    /// 0 for the initial request, then 1.. for corrections.
    pub attempt: usize,
}

impl Request {
    pub fn is_correction(&self) -> bool {
        self.attempt > 0
    }
}

/// Anything that turns a rendered context into a raw textual decision.
///
/// Replies are expected to contain a JSON object with a `policy` field and
/// an optional `chain_of_thought`. Nothing here trusts the reply; it is
/// validated by the [`Correction`](super::Correction) protocol.
pub trait Oracle: Send {
    fn query(&mut self, request: &Request) -> anyhow::Result<String>;
}

impl<F> Oracle for F
where
    F: FnMut(&Request) -> anyhow::Result<String> + Send,
{
    fn query(&mut self, request: &Request) -> anyhow::Result<String> {
        self(request)
    }
}

/// Replays canned replies in order, repeating the last one forever.
/// Every request is recorded in a transcript that outlives the oracle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    replies: VecDeque<Result<String, String>>,
    transcript: Arc<Mutex<Vec<Request>>>,
}

impl ScriptedOracle {
    pub fn new<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self {
            replies: replies.into_iter().map(Into::into).map(Ok).collect(),
            transcript: Arc::default(),
        }
    }
    pub fn then_reply(mut self, reply: impl Into<String>) -> Self {
        self.replies.push_back(Ok(reply.into()));
        self
    }
    /// Queues a backend failure rather than a reply.
    pub fn then_fail(mut self, error: impl Into<String>) -> Self {
        self.replies.push_back(Err(error.into()));
        self
    }
    /// Shared handle on every request seen so far.
    pub fn transcript(&self) -> Arc<Mutex<Vec<Request>>> {
        Arc::clone(&self.transcript)
    }
}

impl Oracle for ScriptedOracle {
    fn query(&mut self, request: &Request) -> anyhow::Result<String> {
        self.transcript
            .lock()
            .map_err(|_| anyhow::anyhow!("transcript lock poisoned"))?
            .push(request.clone());
        let reply = match self.replies.len() {
            0 => return Err(anyhow::anyhow!("script exhausted")),
            1 => self.replies.front().cloned(),
            _ => self.replies.pop_front(),
        };
        match reply {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(error)) => Err(anyhow::anyhow!(error)),
            None => Err(anyhow::anyhow!("script exhausted")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn request(attempt: usize) -> Request {
        Request {
            system: String::new(),
            prompt: "context".into(),
            attempt,
        }
    }
    #[test]
    fn replays_then_repeats_last() {
        let mut oracle = ScriptedOracle::new(["a", "b"]);
        assert_eq!(oracle.query(&request(0)).unwrap(), "a");
        assert_eq!(oracle.query(&request(1)).unwrap(), "b");
        assert_eq!(oracle.query(&request(2)).unwrap(), "b");
        assert_eq!(oracle.transcript().lock().unwrap().len(), 3);
    }
    #[test]
    fn queued_failures_surface_as_errors() {
        let mut oracle = ScriptedOracle::default().then_fail("timeout").then_reply("ok");
        assert!(oracle.query(&request(0)).is_err());
        assert_eq!(oracle.query(&request(1)).unwrap(), "ok");
    }
    #[test]
    fn empty_script_errors() {
        let mut oracle = ScriptedOracle::default();
        assert!(oracle.query(&request(0)).is_err());
    }
    #[test]
    fn closures_are_oracles() {
        let mut oracle =
            |r: &Request| -> anyhow::Result<String> { Ok(format!("attempt {}", r.attempt)) };
        assert_eq!(Oracle::query(&mut oracle, &request(2)).unwrap(), "attempt 2");
        assert!(request(2).is_correction());
    }
}
