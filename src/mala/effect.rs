//! Notifications produced by counter transitions

use serde::Serialize;

/// Side effects for the host to carry out after a transition.
///
/// Both are fire-and-forget; the presentation layer owns any timers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Cosmetic ripple for a single tap
    Pulse,
    /// A full round just finished
    RoundCompleted {
        total_count: u64,
        rounds_completed: u64,
    },
}
