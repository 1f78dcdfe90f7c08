//! Conversation model: roles, turns, and the rolling dialogue history

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Injected context (tool results, instructions)
    System,
    /// The human speaking to the assistant
    User,
    /// The assistant's replies
    Assistant,
}

/// One message in a conversation, tagged with a role
///
/// Turns are never mutated after creation; a conversation only grows by
/// appending new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a user turn
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a system turn
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only dialogue history
///
/// Order is chronological and meaningful; turns are never reordered or
/// deleted individually. The only shrink operation is [`Conversation::trim_to`],
/// which drops whole turns from the front to bound long-running sessions.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the conversation has no turns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Whether the most recent turn is a user turn
    #[must_use]
    pub fn ends_with_user(&self) -> bool {
        self.turns.last().is_some_and(|t| t.role == Role::User)
    }

    /// The most recent assistant turn, if any
    #[must_use]
    pub fn last_assistant(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == Role::Assistant)
    }

    /// Keep only the most recent `window` turns
    ///
    /// Bounds history growth across a long-running session. A window of
    /// zero clears the conversation.
    pub fn trim_to(&mut self, window: usize) {
        if self.turns.len() > window {
            self.turns.drain(..self.turns.len() - window);
        }
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let turn = Turn::assistant("hi");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");

        let back: Turn = serde_json::from_value(json).unwrap();
        assert_eq!(back, turn);
    }

    #[test]
    fn last_assistant_scans_from_end() {
        let mut convo = Conversation::new();
        convo.push(Turn::user("question"));
        convo.push(Turn::assistant("first"));
        convo.push(Turn::system("tool result"));
        convo.push(Turn::assistant("second"));

        assert_eq!(convo.last_assistant().unwrap().content, "second");
    }

    #[test]
    fn ends_with_user_checks_last_turn() {
        let mut convo = Conversation::new();
        assert!(!convo.ends_with_user());

        convo.push(Turn::user("hello"));
        assert!(convo.ends_with_user());

        convo.push(Turn::assistant("hi"));
        assert!(!convo.ends_with_user());
    }

    #[test]
    fn trim_keeps_most_recent_turns() {
        let mut convo = Conversation::new();
        for i in 0..10 {
            convo.push(Turn::user(format!("turn {i}")));
        }

        convo.trim_to(4);
        assert_eq!(convo.len(), 4);
        assert_eq!(convo.turns()[0].content, "turn 6");
        assert_eq!(convo.turns()[3].content, "turn 9");

        // Trimming to a larger window is a no-op
        convo.trim_to(100);
        assert_eq!(convo.len(), 4);
    }
}
