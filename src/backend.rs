//! Guidance backend abstraction
//!
//! The remote text-generation service is reached over a single JSON POST.
//! Its answers come in several shapes; `payload` reduces all of them to a
//! [`GuidanceResult`].

mod error;
mod http;
pub mod payload;
mod types;

#[allow(unused_imports)] // Public API re-exports
pub use error::{BackendError, BackendErrorKind};
pub use http::HttpGuidanceBackend;
#[allow(unused_imports)] // Public API re-exports
pub use types::{GuidanceResult, QueryRequest};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for guidance providers
#[async_trait]
pub trait GuidanceBackend: Send + Sync {
    /// Ask for guidance on a free-text query
    async fn query(&self, text: &str) -> Result<GuidanceResult, BackendError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: GuidanceBackend + ?Sized> GuidanceBackend for Arc<T> {
    async fn query(&self, text: &str) -> Result<GuidanceResult, BackendError> {
        (**self).query(text).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Logging wrapper for guidance backends
pub struct LoggingBackend<B> {
    inner: B,
}

impl<B: GuidanceBackend> LoggingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: GuidanceBackend> GuidanceBackend for LoggingBackend<B> {
    async fn query(&self, text: &str) -> Result<GuidanceResult, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.query(text).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    backend = %self.inner.name(),
                    duration_ms = %duration.as_millis(),
                    query_len = text.len(),
                    empty = answer.is_empty(),
                    "Guidance request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    backend = %self.inner.name(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    status = ?e.status,
                    "Guidance request failed"
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
