//! Session runtime executor

use super::{Inbound, SessionUpdate};
use crate::backend::GuidanceBackend;
use crate::guidance::{transition, Effect, Event, SessionState};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Generic session runtime that can work with any backend implementation
pub struct SessionRuntime<B>
where
    B: GuidanceBackend + 'static,
{
    session_id: String,
    state: SessionState,
    backend: Arc<B>,
    inbound_rx: mpsc::Receiver<Inbound>,
    /// Feeds backend answers back into this loop. Weak, so the inbox
    /// closes once every handle is gone.
    inbound_tx: mpsc::WeakSender<Inbound>,
    broadcast_tx: broadcast::Sender<SessionUpdate>,
    state_tx: watch::Sender<SessionState>,
    shutdown: CancellationToken,
}

impl<B> SessionRuntime<B>
where
    B: GuidanceBackend + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_id: String,
        state: SessionState,
        backend: B,
        inbound_rx: mpsc::Receiver<Inbound>,
        inbound_tx: mpsc::WeakSender<Inbound>,
        broadcast_tx: broadcast::Sender<SessionUpdate>,
        state_tx: watch::Sender<SessionState>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            session_id,
            state,
            backend: Arc::new(backend),
            inbound_rx,
            inbound_tx,
            broadcast_tx,
            state_tx,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "Starting session runtime");

        loop {
            tokio::select! {
                biased;
                () = self.shutdown.cancelled() => break,
                inbound = self.inbound_rx.recv() => match inbound {
                    Some(inbound) => self.process(inbound),
                    // Every handle dropped
                    None => break,
                },
            }
        }

        tracing::info!(session_id = %self.session_id, "Session runtime stopped");
    }

    fn process(&mut self, inbound: Inbound) {
        let Inbound { event, ack } = inbound;

        let accepted = match transition(&self.state, event) {
            Ok(result) => {
                self.state = result.new_state;
                self.state_tx.send_replace(self.state.clone());
                for effect in result.effects {
                    self.execute_effect(effect);
                }
                true
            }
            Err(e) => {
                // Never surfaced to the host; it only sees `accepted == false`
                tracing::debug!(session_id = %self.session_id, error = %e, "Dropped event");
                false
            }
        };

        if let Some(ack) = ack {
            let _ = ack.send(accepted);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::QueryBackend { query } => {
                let Some(inbound_tx) = self.inbound_tx.upgrade() else {
                    tracing::debug!(session_id = %self.session_id, "No handles left, skipping backend query");
                    return;
                };
                let backend = Arc::clone(&self.backend);
                let session_id = self.session_id.clone();

                tokio::spawn(async move {
                    let event = match backend.query(&query).await {
                        Ok(result) => Event::BackendResolved {
                            result,
                            message_id: uuid::Uuid::new_v4().to_string(),
                            at: Utc::now(),
                        },
                        Err(e) => Event::BackendFailed {
                            error: e.message,
                            kind: e.kind,
                            message_id: uuid::Uuid::new_v4().to_string(),
                            at: Utc::now(),
                        },
                    };
                    if inbound_tx.send(event.into()).await.is_err() {
                        tracing::debug!(session_id = %session_id, "Session closed before backend answered");
                    }
                });
            }

            Effect::NotifyMessage { message } => {
                // No subscribers is fine
                let _ = self
                    .broadcast_tx
                    .send(SessionUpdate::MessageAppended { message });
            }

            Effect::NotifyPending { pending } => {
                let _ = self
                    .broadcast_tx
                    .send(SessionUpdate::PendingChanged { pending });
            }
        }
    }
}
