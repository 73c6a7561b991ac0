//! Mock transport - scripted events and recorded sends.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use news_core::{Transport, TransportError, TransportEvent};
use tokio::sync::{mpsc, watch};

/// A message handed to [`MockTransport::send_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: String,
    pub text: String,
}

#[derive(Default)]
struct MockState {
    scripts: VecDeque<Vec<TransportEvent>>,
    current: Option<mpsc::Sender<TransportEvent>>,
    sent: Vec<SentMessage>,
    failing_sends: usize,
    fail_all_sends: bool,
}

/// A transport whose sessions replay scripted events.
///
/// Each call to `start` consumes the next script (or none) and keeps the
/// session's sender alive so tests can [`emit`](MockTransport::emit) more
/// events later.
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    starts: Arc<AtomicUsize>,
    attempts: Arc<AtomicUsize>,
    saves: Arc<AtomicUsize>,
    clears: Arc<AtomicUsize>,
    /// While true, sends wait before resolving.
    hold: Arc<watch::Sender<bool>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            state: Arc::default(),
            starts: Arc::default(),
            attempts: Arc::default(),
            saves: Arc::default(),
            clears: Arc::default(),
            hold: Arc::new(watch::channel(false).0),
        }
    }
}

impl MockTransport {
    /// Create a transport with no scripted sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events the next session will emit on start.
    pub fn script_session(&self, events: Vec<TransportEvent>) {
        self.with_state(|s| s.scripts.push_back(events));
    }

    /// Emit an event on the current session. Returns false if none is open.
    pub async fn emit(&self, event: TransportEvent) -> bool {
        let sender = self.with_state(|s| s.current.clone());
        match sender {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    /// Make the next `count` sends fail.
    pub fn fail_next_sends(&self, count: usize) {
        self.with_state(|s| s.failing_sends = count);
    }

    /// Make every send fail until turned off.
    pub fn set_fail_all_sends(&self, fail: bool) {
        self.with_state(|s| s.fail_all_sends = fail);
    }

    /// Make later sends wait until [`release_sends`](Self::release_sends).
    pub fn hold_sends(&self) {
        self.hold.send_replace(true);
    }

    /// Let held and later sends resolve.
    pub fn release_sends(&self) {
        self.hold.send_replace(false);
    }

    /// Number of sends started, including held and failed ones.
    pub fn send_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Messages successfully sent so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.with_state(|s| s.sent.clone())
    }

    /// Number of sessions started.
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Number of credential saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of credential clears.
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn start(&self) -> Result<mpsc::Receiver<TransportEvent>, TransportError> {
        self.starts.fetch_add(1, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(64);
        let script = self.with_state(|s| {
            s.current = Some(tx.clone());
            s.scripts.pop_front().unwrap_or_default()
        });

        for event in script {
            tx.send(event)
                .await
                .map_err(|e| TransportError::Start(e.to_string()))?;
        }

        Ok(rx)
    }

    async fn send_text(&self, destination: &str, text: &str) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let mut hold = self.hold.subscribe();
        // The sender lives in self, so the wait cannot fail.
        let _ = hold.wait_for(|held| !held).await;

        self.with_state(|s| {
            if s.fail_all_sends {
                return Err(TransportError::Send("mock send failure".to_string()));
            }
            if s.failing_sends > 0 {
                s.failing_sends -= 1;
                return Err(TransportError::Send("mock send failure".to_string()));
            }
            s.sent.push(SentMessage {
                destination: destination.to_string(),
                text: text.to_string(),
            });
            Ok(())
        })
    }

    async fn save_credentials(&self) -> Result<(), TransportError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear_credentials(&self) -> Result<(), TransportError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "MockTransport"
    }
}
