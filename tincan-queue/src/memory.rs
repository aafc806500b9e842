//! In-memory Transport implementation for testing.
//!
//! Records every delivered statement in order. Failures and latency can be
//! scripted to exercise the retry path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::traits::Transport;

/// Recording transport.
pub struct InMemoryTransport<T> {
    /// Statements accepted so far, in delivery order
    delivered: RwLock<Vec<T>>,
    /// Number of upcoming sends that should fail
    failures_remaining: AtomicUsize,
    /// Total number of send calls, including failed ones
    attempts: AtomicUsize,
    /// Simulated latency per send
    delay: Option<Duration>,
}

impl<T> InMemoryTransport<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new transport that accepts everything immediately.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delivered: RwLock::new(Vec::new()),
            failures_remaining: AtomicUsize::new(0),
            attempts: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Sleep for `delay` inside every send.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make the next `count` sends fail.
    pub fn fail_next(&self, count: usize) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    /// Snapshot of the delivered statements.
    pub async fn delivered(&self) -> Vec<T> {
        self.delivered.read().await.clone()
    }

    /// Number of delivered statements.
    pub async fn len(&self) -> usize {
        self.delivered.read().await.len()
    }

    /// Check if nothing has been delivered.
    pub async fn is_empty(&self) -> bool {
        self.delivered.read().await.is_empty()
    }

    /// Number of send calls seen so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl<T> Default for InMemoryTransport<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Transport<T> for InMemoryTransport<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn send(&self, statement: &T) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let should_fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(Error::Transport("scripted failure".to_string()));
        }

        self.delivered.write().await.push(statement.clone());
        Ok(())
    }
}
