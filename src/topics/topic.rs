use serde::Deserialize;
use serde::Serialize;

const PRIVATE: &str = "private:";
const PUBLIC: &str = "public";
const POLICY: &str = "policy";

/// A communication channel.
///
/// Serializes as its wire name, e.g. `private:alice` or `public`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Topic {
    /// Visible only to the named player.
    Private(String),
    /// Visible to everyone.
    Public,
    /// Any other named channel (players reply on `policy`).
    Channel(String),
}

impl Topic {
    pub fn private(player: &str) -> Self {
        Self::Private(player.to_string())
    }
    pub fn policy() -> Self {
        Self::Channel(POLICY.to_string())
    }
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
    /// The player owning a private topic.
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Private(player) => Some(player),
            _ => None,
        }
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        match s.strip_prefix(PRIVATE) {
            Some(player) => Self::Private(player.to_string()),
            None if s == PUBLIC => Self::Public,
            None => Self::Channel(s.to_string()),
        }
    }
}

impl From<String> for Topic {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.to_string()
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Private(player) => write!(f, "{}{}", PRIVATE, player),
            Self::Public => write!(f, "{}", PUBLIC),
            Self::Channel(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn private_topic_names_owner() {
        let topic = Topic::from("private:alice");
        assert!(topic.is_private());
        assert!(!topic.is_public());
        assert_eq!(topic.owner(), Some("alice"));
    }
    #[test]
    fn owner_keeps_colons_after_prefix() {
        assert_eq!(Topic::from("private:a:b").owner(), Some("a:b"));
    }
    #[test]
    fn public_topic_has_no_owner() {
        let topic = Topic::from("public");
        assert!(topic.is_public());
        assert_eq!(topic.owner(), None);
    }
    #[test]
    fn wire_name_survives_display() {
        for name in ["private:bob", "public", "policy"] {
            assert_eq!(Topic::from(name).to_string(), name);
        }
    }
}
