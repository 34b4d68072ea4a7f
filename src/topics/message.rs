use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Structured envelope between moderator and players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub receiver: Option<String>,
    pub topic: Topic,
    pub content: Content,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Message {
    /// Moderator to player, on that player's private topic.
    pub fn briefing(receiver: &str, briefing: Briefing) -> Self {
        Self {
            sender: MODERATOR.to_string(),
            receiver: Some(receiver.to_string()),
            topic: Topic::private(receiver),
            content: Content::Briefing(briefing),
            metadata: BTreeMap::new(),
        }
    }
    /// Player to moderator, on the policy channel.
    pub fn decision(sender: &str, decision: Decision) -> Self {
        Self {
            sender: sender.to_string(),
            receiver: Some(MODERATOR.to_string()),
            topic: Topic::policy(),
            content: Content::Decision(decision),
            metadata: BTreeMap::new(),
        }
    }
    pub fn with_metadata(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
    /// Marks a decision the sender substituted for one it failed to obtain.
    pub fn with_fallback(self, reason: &str) -> Self {
        self.with_metadata("fallback", reason)
    }
    pub fn fallback(&self) -> Option<&str> {
        self.metadata.get("fallback").map(String::as_str)
    }
    pub fn is_private(&self) -> bool {
        self.topic.is_private()
    }
    pub fn is_public(&self) -> bool {
        self.topic.is_public()
    }
    pub fn briefing_content(&self) -> Option<&Briefing> {
        match &self.content {
            Content::Briefing(b) => Some(b),
            _ => None,
        }
    }
    pub fn decision_content(&self) -> Option<&Decision> {
        match &self.content {
            Content::Decision(d) => Some(d),
            _ => None,
        }
    }
    pub fn policy(&self) -> Option<&Policy> {
        self.decision_content().map(|d| &d.policy)
    }
    pub fn chain_of_thought(&self) -> Option<&str> {
        self.decision_content()
            .and_then(|d| d.chain_of_thought.as_deref())
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Message({} -> {}, topic={})",
            self.sender,
            self.receiver.as_deref().unwrap_or("*"),
            self.topic
        )
    }
}
