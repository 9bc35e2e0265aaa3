//! Effects produced by session transitions

use super::state::Message;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the backend; exactly one resolution event must follow
    QueryBackend { query: String },

    /// A message was appended to the transcript
    NotifyMessage { message: Message },

    /// The in-flight flag flipped (drives the typing indicator)
    NotifyPending { pending: bool },
}

impl Effect {
    pub fn query_backend(query: impl Into<String>) -> Self {
        Effect::QueryBackend {
            query: query.into(),
        }
    }

    pub fn notify_message(message: Message) -> Self {
        Effect::NotifyMessage { message }
    }
}
