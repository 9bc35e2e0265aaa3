//! Session state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WELCOME_ID: &str = "welcome";

pub const WELCOME_TEXT: &str =
    "Welcome to Saarathi — your inner charioteer. Ask a question and receive guidance from the Gītā.";

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Serialised as RFC 3339
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(id: impl Into<String>, text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            text: text.into(),
            timestamp: at,
        }
    }

    pub fn assistant(id: impl Into<String>, text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            text: text.into(),
            timestamp: at,
        }
    }
}

/// Session state: append-only transcript plus the in-flight flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub transcript: Vec<Message>,
    /// True between an accepted submit and its resolution
    pub pending: bool,
}

impl SessionState {
    /// Fresh session holding only the welcome message
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            transcript: vec![Message::assistant(WELCOME_ID, WELCOME_TEXT, now)],
            pending: false,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Message> {
        self.transcript.iter().find(|m| m.id == id)
    }

    /// Text to hand to the host clipboard. Never mutates the session.
    pub fn copy_message(&self, id: &str) -> Option<&str> {
        self.find(id).map(|m| m.text.as_str())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            transcript: self.transcript.clone(),
            pending: self.pending,
        }
    }
}

/// Read-only view published to hosts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Message>,
    pub pending: bool,
}
