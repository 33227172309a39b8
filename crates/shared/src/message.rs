//! Chat message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text of the bot message that opens every session.
pub const GREETING: &str = "Hello! I'm your personal mental health and productivity coach. I'm here to support you with stress management, motivation, goal-setting, and general well-being. How can I help you today?";

/// Who wrote a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// A freshly timestamped session greeting
    pub fn greeting() -> Self {
        Self::new(GREETING, Sender::Bot)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_get_unique_ids() {
        let a = Message::new("hi", Sender::User);
        let b = Message::new("hi", Sender::User);
        assert_ne!(a.id, b.id);
        assert!(a.is_user());
    }

    #[test]
    fn test_greeting() {
        let msg = Message::greeting();
        assert_eq!(msg.text, GREETING);
        assert_eq!(msg.sender, Sender::Bot);
    }
}
