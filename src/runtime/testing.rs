//! Mock implementations for testing
//!
//! These mocks enable runtime tests without a real backend.

use crate::backend::{BackendError, GuidanceBackend, GuidanceResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Backend
// ============================================================================

/// Mock backend that returns queued answers
pub struct MockBackend {
    responses: Mutex<VecDeque<Result<GuidanceResult, BackendError>>>,
    /// Record of every query made
    pub queries: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful answer
    pub fn queue_result(&self, result: GuidanceResult) {
        self.responses.lock().unwrap().push_back(Ok(result));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: BackendError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn next(&self, text: &str) -> Result<GuidanceResult, BackendError> {
        self.queries.lock().unwrap().push(text.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::network("No mock response queued")))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GuidanceBackend for MockBackend {
    async fn query(&self, text: &str) -> Result<GuidanceResult, BackendError> {
        self.next(text)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Delayed Mock Backend (for re-entrancy testing)
// ============================================================================

/// Mock backend with a configurable delay
pub struct DelayedMockBackend {
    inner: MockBackend,
    delay: Duration,
    /// Notified when a request starts
    pub request_started: Arc<Notify>,
}

impl DelayedMockBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockBackend::new(),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_result(&self, result: GuidanceResult) {
        self.inner.queue_result(result);
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.inner.recorded_queries()
    }
}

#[async_trait]
impl GuidanceBackend for DelayedMockBackend {
    async fn query(&self, text: &str) -> Result<GuidanceResult, BackendError> {
        self.request_started.notify_waiters();
        tokio::time::sleep(self.delay).await;
        self.inner.next(text)
    }

    fn name(&self) -> &str {
        "delayed-mock"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::payload;
    use crate::guidance::{Role, SessionState, CONNECTION_ERROR_TEXT, WELCOME_TEXT};
    use crate::runtime::{SessionHandle, SessionManager, SessionUpdate};
    use tokio::sync::watch;

    /// Wait until the session settles with `len` transcript entries
    async fn wait_settled(rx: &mut watch::Receiver<SessionState>, len: usize) -> SessionState {
        tokio::time::timeout(
            Duration::from_secs(2),
            rx.wait_for(|s| !s.pending && s.transcript.len() == len),
        )
        .await
        .expect("session did not settle")
        .expect("session closed")
        .clone()
    }

    #[tokio::test]
    async fn test_mock_backend() {
        let mock = MockBackend::new();
        mock.queue_result(GuidanceResult::meaning("Hello"));

        let result = mock.query("hi").await.unwrap();
        assert_eq!(result.meaning.as_deref(), Some("Hello"));

        // Second call should fail (no more responses)
        assert!(mock.query("again").await.is_err());
        assert_eq!(mock.recorded_queries(), vec!["hi", "again"]);
    }

    #[tokio::test]
    async fn test_new_session_has_welcome() {
        let session = SessionHandle::spawn("s1", MockBackend::new());
        let snapshot = session.snapshot();
        assert_eq!(snapshot.transcript.len(), 1);
        assert_eq!(snapshot.transcript[0].text, WELCOME_TEXT);
        assert!(!snapshot.pending);
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_reply() {
        let backend = Arc::new(MockBackend::new());
        backend.queue_result(payload::decode(
            br#"{"results": {"text": "{\"sanskrit\":\"X\",\"meaning\":\"Y\"}"}}"#,
        ));
        let session = SessionHandle::spawn("s1", Arc::clone(&backend));
        let mut rx = session.watch();

        assert!(session.submit("  How to focus in life?  ").await);
        let snapshot = wait_settled(&mut rx, 3).await;

        assert_eq!(snapshot.transcript[1].role, Role::User);
        assert_eq!(snapshot.transcript[1].text, "How to focus in life?");
        assert_eq!(snapshot.transcript[2].role, Role::Assistant);
        assert_eq!(snapshot.transcript[2].text, "X\n\nY");
        assert_eq!(backend.recorded_queries(), vec!["How to focus in life?"]);
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_message() {
        let backend = Arc::new(MockBackend::new());
        backend.queue_error(BackendError::status(500, "boom"));
        let session = SessionHandle::spawn("s1", Arc::clone(&backend));
        let mut rx = session.watch();

        assert!(session.submit("Advice for failure").await);
        let snapshot = wait_settled(&mut rx, 3).await;

        assert_eq!(snapshot.transcript[2].role, Role::Assistant);
        assert_eq!(snapshot.transcript[2].text, CONNECTION_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_blank_submit_dropped() {
        let backend = Arc::new(MockBackend::new());
        let session = SessionHandle::spawn("s1", Arc::clone(&backend));

        assert!(!session.submit("   ").await);
        assert_eq!(session.snapshot().transcript.len(), 1);
        assert!(backend.recorded_queries().is_empty());
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_dropped() {
        let backend = Arc::new(DelayedMockBackend::new(Duration::from_millis(200)));
        backend.queue_result(GuidanceResult::meaning("first"));
        backend.queue_result(GuidanceResult::meaning("second"));
        let session = SessionHandle::spawn("s1", Arc::clone(&backend));
        let mut rx = session.watch();

        assert!(session.submit("a").await);
        assert!(!session.submit("b").await);

        let during = session.snapshot();
        assert!(during.pending);
        assert_eq!(during.transcript.len(), 2);
        assert_eq!(during.transcript[1].text, "a");

        let after = wait_settled(&mut rx, 3).await;
        assert_eq!(after.transcript[2].text, "first");
        assert_eq!(backend.recorded_queries(), vec!["a"]);

        // Accepted again once the first query resolved
        assert!(session.submit("b").await);
        let last = wait_settled(&mut rx, 5).await;
        assert_eq!(last.transcript[3].text, "b");
        assert_eq!(last.transcript[4].text, "second");
    }

    #[tokio::test]
    async fn test_updates_are_broadcast() {
        let backend = Arc::new(MockBackend::new());
        backend.queue_result(GuidanceResult::meaning("Be still"));
        let session = SessionHandle::spawn("s1", Arc::clone(&backend));
        let mut updates = session.subscribe();

        assert!(session.submit("q").await);

        let mut seen = vec![];
        while seen.len() < 4 {
            let update = tokio::time::timeout(Duration::from_secs(2), updates.recv())
                .await
                .expect("timed out")
                .expect("channel closed");
            seen.push(update);
        }

        assert!(matches!(&seen[0], SessionUpdate::MessageAppended { message } if message.role == Role::User));
        assert!(matches!(seen[1], SessionUpdate::PendingChanged { pending: true }));
        assert!(matches!(&seen[2], SessionUpdate::MessageAppended { message } if message.text == "Be still"));
        assert!(matches!(seen[3], SessionUpdate::PendingChanged { pending: false }));
    }

    #[tokio::test]
    async fn test_copy_message_reads_transcript() {
        let backend = Arc::new(MockBackend::new());
        backend.queue_result(GuidanceResult::meaning("Act without attachment"));
        let session = SessionHandle::spawn("s1", Arc::clone(&backend));
        assert_eq!(session.copy_message("welcome").as_deref(), Some(WELCOME_TEXT));
        assert_eq!(session.copy_message("nope"), None);

        let mut rx = session.watch();
        assert!(session.submit("Detachment meaning").await);
        let state = wait_settled(&mut rx, 3).await;

        let reply = &state.transcript[2];
        assert_eq!(
            session.copy_message(&reply.id).as_deref(),
            Some("Act without attachment")
        );
        assert_eq!(
            session.copy_message(&state.transcript[1].id).as_deref(),
            Some("Detachment meaning")
        );
    }

    #[tokio::test]
    async fn test_runtime_stops_when_handles_dropped() {
        let session = SessionHandle::spawn("s1", MockBackend::new());
        let mut rx = session.watch();
        drop(session);

        // The loop owns the only state sender; it closes when the loop exits
        let closed = tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("runtime still running");
        assert!(closed.is_err());
    }

    #[tokio::test]
    async fn test_ended_session_rejects_submit() {
        let backend = Arc::new(MockBackend::new());
        let session = SessionHandle::spawn("s1", Arc::clone(&backend));
        session.end();
        assert!(session.is_ended());

        // Give the loop a moment to observe the cancellation
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!session.submit("late").await);
        assert!(backend.recorded_queries().is_empty());
    }

    #[tokio::test]
    async fn test_manager_lifecycle() {
        let manager = SessionManager::new(Arc::new(MockBackend::new()));
        let a = manager.create().await;
        let b = manager.create().await;
        assert_ne!(a.id, b.id);
        assert_eq!(manager.count().await, 2);

        assert!(manager.get(&a.id).await.is_some());
        assert!(manager.end(&a.id).await);
        assert!(!manager.end(&a.id).await);
        assert!(manager.get(&a.id).await.is_none());
        assert_eq!(manager.count().await, 1);
    }
}
