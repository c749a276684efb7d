use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz::QuizState;

/// Free-text description of the learner, collected once per session and used
/// to personalize every prompt.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LearnerProfile {
    pub personal_info: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Human,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Human,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Everything one tutoring session accumulates. Ephemeral; nothing survives a
/// process restart.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionState {
    pub profile: Option<LearnerProfile>,
    pub topic: Option<String>,
    pub content: Option<String>,
    pub chat_history: Vec<ChatTurn>, // append-only
    pub quiz: Option<QuizState>,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            profile: None,
            topic: None,
            content: None,
            chat_history: Vec::new(),
            quiz: None,
            created_at: Utc::now(),
        }
    }

    /// Restore every field to its initial empty value ("Start Over").
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The most recent assistant turn, used as context for follow-up
    /// questions.
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.chat_history
            .iter()
            .rev()
            .find(|turn| turn.role == ChatRole::Assistant)
            .map(|turn| turn.text.as_str())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
