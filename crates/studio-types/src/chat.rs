//! Transcript types for the guided prompt-builder conversation.
//!
//! A transcript is an append-only ordered log of turns exchanged between
//! the user and the assistant. Turns are never removed or reordered; the
//! only way to shrink a transcript is a full reset back to the seeded
//! greeting.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The assistant greeting every fresh transcript starts with.
pub const GREETING: &str =
    "Hello! Describe an idea, and I'll help you craft a detailed prompt for generating amazing visuals.";

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Append-only ordered log of conversation turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// A fresh transcript holding only the seeded greeting.
    pub fn seeded() -> Self {
        Self {
            turns: vec![ChatTurn::assistant(GREETING)],
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::user(text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(text));
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// The most recent assistant turn, if any.
    pub fn last_assistant(&self) -> Option<&ChatTurn> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.sender == Sender::Assistant)
    }

    pub fn get(&self, index: usize) -> Option<&ChatTurn> {
        self.turns.get(index)
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Assistant] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: Sender = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Sender::Assistant);
    }

    #[test]
    fn test_seeded_transcript_has_greeting() {
        let transcript = Transcript::seeded();
        assert_eq!(transcript.len(), 1);
        let turn = transcript.last().unwrap();
        assert_eq!(turn.sender, Sender::Assistant);
        assert_eq!(turn.text, GREETING);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::seeded();
        transcript.push_user("a dog");
        transcript.push_assistant("What should the a dog be doing?");
        transcript.push_user("running");

        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.get(1).unwrap().text, "a dog");
        assert_eq!(transcript.get(3).unwrap().text, "running");
    }

    #[test]
    fn test_last_assistant_skips_user_turns() {
        let mut transcript = Transcript::seeded();
        transcript.push_assistant("Where is this scene taking place?");
        transcript.push_user("a forest");

        let last = transcript.last_assistant().unwrap();
        assert_eq!(last.text, "Where is this scene taking place?");
    }

    #[test]
    fn test_transcript_serde_transparent() {
        let transcript = Transcript::seeded();
        let json = serde_json::to_value(&transcript).unwrap();
        assert!(json.is_array());
        let parsed: Transcript = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, transcript);
    }
}
