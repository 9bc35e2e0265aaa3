//! HTTP API for Mandir
//!
//! Exposes guidance sessions, mala counters, bottom-nav visibility and the
//! deity catalog to a UI client.

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::backend::GuidanceBackend;
use crate::config::AppConfig;
use crate::mala::MalaState;
use crate::nav::NavVisibility;
use crate::runtime::SessionManager;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub malas: Arc<RwLock<HashMap<String, MalaState>>>,
    pub nav: Arc<NavVisibility>,
    /// Used when a new counter does not say
    pub beads_per_round: u32,
}

impl AppState {
    pub fn new(config: &AppConfig, backend: Arc<dyn GuidanceBackend>) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(backend)),
            malas: Arc::new(RwLock::new(HashMap::new())),
            nav: Arc::new(NavVisibility::new()),
            beads_per_round: config.beads_per_round,
        }
    }
}
