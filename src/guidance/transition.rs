//! Pure state transition function
//!
//! Given the same state and event this always produces the same result;
//! ids and timestamps arrive inside the event.

use super::render::{render, CONNECTION_ERROR_TEXT};
use super::state::Message;
use super::{Effect, Event, SessionState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is rejected. The session layer drops these silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Query is empty")]
    EmptyQuery,
    #[error("A query is already in flight")]
    Busy,
    #[error("Unexpected event: {0}")]
    Unexpected(&'static str),
}

pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Submit {
            text,
            message_id,
            at,
        } => {
            let query = text.trim();
            if query.is_empty() {
                return Err(TransitionError::EmptyQuery);
            }
            if state.pending {
                return Err(TransitionError::Busy);
            }

            let message = Message::user(message_id, query, at);
            let mut next = state.clone();
            next.transcript.push(message.clone());
            next.pending = true;

            Ok(TransitionResult::new(next)
                .with_effect(Effect::notify_message(message))
                .with_effect(Effect::NotifyPending { pending: true })
                .with_effect(Effect::query_backend(query)))
        }

        Event::BackendResolved {
            result,
            message_id,
            at,
        } => {
            if !state.pending {
                return Err(TransitionError::Unexpected("backend result with nothing pending"));
            }
            Ok(reply(state, Message::assistant(message_id, render(&result), at)))
        }

        Event::BackendFailed {
            error,
            kind,
            message_id,
            at,
        } => {
            if !state.pending {
                return Err(TransitionError::Unexpected("backend failure with nothing pending"));
            }
            tracing::warn!(error = %error, kind = ?kind, "Guidance backend failed");
            Ok(reply(
                state,
                Message::assistant(message_id, CONNECTION_ERROR_TEXT, at),
            ))
        }
    }
}

/// Append the single assistant reply and clear the in-flight flag
fn reply(state: &SessionState, message: Message) -> TransitionResult {
    let mut next = state.clone();
    next.transcript.push(message.clone());
    next.pending = false;
    TransitionResult::new(next)
        .with_effect(Effect::notify_message(message))
        .with_effect(Effect::NotifyPending { pending: false })
}
