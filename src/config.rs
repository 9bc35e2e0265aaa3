//! Process configuration from environment variables
//!
//! Bad values are logged and replaced by defaults so a typo never keeps the
//! server from starting.

use crate::mala::state::DEFAULT_BEADS_PER_ROUND;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the guidance backend, no trailing slash
    pub api_url: String,
    pub port: u16,
    pub backend_timeout: Duration,
    pub beads_per_round: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            port: DEFAULT_PORT,
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            beads_per_round: DEFAULT_BEADS_PER_ROUND,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup("MANDIR_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);

        let port = parsed(&lookup, "MANDIR_PORT", "port", |v: &u16| *v > 0)
            .unwrap_or(defaults.port);

        let backend_timeout = parsed(
            &lookup,
            "MANDIR_BACKEND_TIMEOUT_SECS",
            "timeout in seconds",
            |v: &u64| *v > 0,
        )
        .map_or(defaults.backend_timeout, Duration::from_secs);

        let beads_per_round = parsed(
            &lookup,
            "MANDIR_BEADS_PER_ROUND",
            "bead count",
            |v: &u32| *v > 0,
        )
        .unwrap_or(defaults.beads_per_round);

        Self {
            api_url,
            port,
            backend_timeout,
            beads_per_round,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    raw: &str,
    valid: impl Fn(&T) -> bool,
) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(valid)
        .ok_or_else(|| ConfigError::Invalid {
            var,
            expected,
            value: raw.to_string(),
        })
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = lookup(var)?;
    match parse_var(var, expected, &raw, valid) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring invalid configuration, using default");
            None
        }
    }
}
