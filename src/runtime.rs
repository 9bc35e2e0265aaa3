//! Runtime for guidance sessions
//!
//! Each session runs its own event loop task. Hosts talk to it through a
//! cloneable [`SessionHandle`]; nothing outlives the session.

mod executor;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // Public API re-exports
pub use executor::SessionRuntime;

use crate::backend::GuidanceBackend;
use crate::guidance::{Event, Message, SessionSnapshot, SessionState};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch, RwLock};
use tokio_util::sync::CancellationToken;

/// Updates pushed to subscribers (SSE)
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    MessageAppended { message: Message },
    PendingChanged { pending: bool },
}

/// An event for the runtime, optionally with a channel that learns whether
/// the transition was accepted
#[derive(Debug)]
pub struct Inbound {
    pub event: Event,
    pub ack: Option<oneshot::Sender<bool>>,
}

impl From<Event> for Inbound {
    fn from(event: Event) -> Self {
        Self { event, ack: None }
    }
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub id: String,
    inbound_tx: mpsc::Sender<Inbound>,
    broadcast_tx: broadcast::Sender<SessionUpdate>,
    /// Latest state after every accepted transition
    state_rx: watch::Receiver<SessionState>,
    shutdown: CancellationToken,
}

impl SessionHandle {
    /// Start a session with a fresh transcript on the current tokio runtime
    pub fn spawn<B: GuidanceBackend + 'static>(id: impl Into<String>, backend: B) -> Self {
        let id = id.into();
        let state = SessionState::start(Utc::now());
        let (inbound_tx, inbound_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (state_tx, state_rx) = watch::channel(state.clone());
        let shutdown = CancellationToken::new();

        let runtime = SessionRuntime::new(
            id.clone(),
            state,
            backend,
            inbound_rx,
            inbound_tx.downgrade(),
            broadcast_tx.clone(),
            state_tx,
            shutdown.clone(),
        );

        let session_id = id.clone();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(session_id = %session_id, "Session runtime finished");
        });

        Self {
            id,
            inbound_tx,
            broadcast_tx,
            state_rx,
            shutdown,
        }
    }

    /// Submit a query.
    ///
    /// Returns whether it was taken. Blank queries and queries sent while
    /// another is in flight are dropped; so is anything sent after the
    /// session ended.
    pub async fn submit(&self, text: impl Into<String>) -> bool {
        let (ack, accepted) = oneshot::channel();
        let inbound = Inbound {
            event: Event::Submit {
                text: text.into(),
                message_id: uuid::Uuid::new_v4().to_string(),
                at: Utc::now(),
            },
            ack: Some(ack),
        };
        if self.inbound_tx.send(inbound).await.is_err() {
            return false;
        }
        accepted.await.unwrap_or(false)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state_rx.borrow().snapshot()
    }

    /// Latest state plus change notification
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.broadcast_tx.subscribe()
    }

    /// Message text for the host clipboard
    pub fn copy_message(&self, message_id: &str) -> Option<String> {
        self.state_rx
            .borrow()
            .copy_message(message_id)
            .map(str::to_owned)
    }

    /// Stop the event loop. An in-flight backend answer is discarded.
    pub fn end(&self) {
        self.shutdown.cancel();
    }

    pub fn is_ended(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

/// Manager for all live guidance sessions
pub struct SessionManager {
    backend: Arc<dyn GuidanceBackend>,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn GuidanceBackend>) -> Self {
        Self {
            backend,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a new session
    pub async fn create(&self) -> SessionHandle {
        let id = uuid::Uuid::new_v4().to_string();
        let handle = SessionHandle::spawn(id.clone(), Arc::clone(&self.backend));
        self.sessions.write().await.insert(id.clone(), handle.clone());
        tracing::info!(session_id = %id, "Guidance session started");
        handle
    }

    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// End a session and forget it. Returns false for unknown ids.
    pub async fn end(&self, id: &str) -> bool {
        match self.sessions.write().await.remove(id) {
            Some(handle) => {
                handle.end();
                tracing::info!(session_id = %id, "Guidance session ended");
                true
            }
            None => false,
        }
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
