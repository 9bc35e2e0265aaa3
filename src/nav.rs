//! Bottom navigation visibility
//!
//! Screens claim a visibility when they gain focus and drop the claim when
//! they lose it. The most recent claim wins; with no claims the bar is shown.
//! Subscribers get a `watch` receiver and unsubscribe by dropping it.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tokio::sync::watch;

/// Per-screen options applied on focus
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScreenOptions {
    /// `None` leaves the current visibility alone
    #[serde(default)]
    pub hide_bottom_nav: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Claim {
    screen: String,
    visible: bool,
}

/// Visibility store shared by all screens
pub struct NavVisibility {
    claims: Mutex<Vec<Claim>>,
    tx: watch::Sender<bool>,
}

impl NavVisibility {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(true);
        Self {
            claims: Mutex::new(Vec::new()),
            tx,
        }
    }

    pub fn visible(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Screen gained focus
    pub fn focus(&self, screen: &str, options: ScreenOptions) {
        let mut claims = self.lock();
        claims.retain(|c| c.screen != screen);
        if let Some(hide) = options.hide_bottom_nav {
            claims.push(Claim {
                screen: screen.to_string(),
                visible: !hide,
            });
        }
        self.publish(&claims);
    }

    /// Screen lost focus; its claim goes away
    pub fn blur(&self, screen: &str) {
        let mut claims = self.lock();
        claims.retain(|c| c.screen != screen);
        self.publish(&claims);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Claim>> {
        // A poisoned lock still holds a consistent Vec
        self.claims
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn publish(&self, claims: &[Claim]) {
        let visible = claims.last().map_or(true, |c| c.visible);
        self.tx.send_if_modified(|current| {
            if *current == visible {
                false
            } else {
                *current = visible;
                true
            }
        });
        tracing::debug!(visible, claims = claims.len(), "Bottom nav visibility");
    }
}

impl Default for NavVisibility {
    fn default() -> Self {
        Self::new()
    }
}
