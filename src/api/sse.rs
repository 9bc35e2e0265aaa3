//! Server-Sent Events support

use crate::guidance::SessionSnapshot;
use crate::runtime::SessionUpdate;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Snapshot first, then live updates
pub fn sse_stream(
    session_id: String,
    snapshot: SessionSnapshot,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionUpdate>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(init_event(&session_id, &snapshot)) });

    let updates = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(update) => Some(Ok(update_event(update))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(updates)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_event(session_id: &str, snapshot: &SessionSnapshot) -> Event {
    let data = json!({
        "type": "init",
        "session_id": session_id,
        "transcript": snapshot.transcript,
        "pending": snapshot.pending,
    });
    Event::default().event("init").data(data.to_string())
}

fn update_event(update: SessionUpdate) -> Event {
    let (event_type, data) = match update {
        SessionUpdate::MessageAppended { message } => (
            "message",
            json!({
                "type": "message",
                "message": message
            }),
        ),
        SessionUpdate::PendingChanged { pending } => (
            "pending",
            json!({
                "type": "pending",
                "pending": pending
            }),
        ),
    };

    Event::default().event(event_type).data(data.to_string())
}
