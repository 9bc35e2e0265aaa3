//! HTTP implementation of the guidance backend

use super::payload;
use super::{BackendError, GuidanceBackend, GuidanceResult, QueryRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Talks to `<base_url>/saarathi`
pub struct HttpGuidanceBackend {
    client: Client,
    endpoint: String,
}

impl HttpGuidanceBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/saarathi", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GuidanceBackend for HttpGuidanceBackend {
    async fn query(&self, text: &str) -> Result<GuidanceResult, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryRequest { q: text })
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort; the status alone is enough to fail
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::status(status.as_u16(), &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::from_reqwest(&e))?;

        Ok(payload::decode(&body))
    }

    fn name(&self) -> &str {
        "http"
    }
}
