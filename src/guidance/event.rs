//! Events that can occur in a guidance session

use crate::backend::{BackendErrorKind, GuidanceResult};
use chrono::{DateTime, Utc};

/// Events that trigger state transitions.
///
/// Ids and timestamps are minted by the caller so that transitions stay pure.
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    Submit {
        text: String,
        message_id: String,
        at: DateTime<Utc>,
    },

    // Backend events
    BackendResolved {
        result: GuidanceResult,
        message_id: String,
        at: DateTime<Utc>,
    },
    BackendFailed {
        error: String,
        kind: BackendErrorKind,
        message_id: String,
        at: DateTime<Utc>,
    },
}
