//! FIFO delivery queue drained by a single background task.
//!
//! ```text
//!  enqueue ──► [s0][s1][flush][s2] ──► drain task ──► Transport::send
//!     │                                    │
//!     └── pending += 1          pending -= 1 (after each item)
//! ```
//!
//! Records are sent strictly in enqueue order and never concurrently.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::config::QueueConfig;
use crate::error::{Error, Result};
use crate::traits::{QueueItem, Transport};

/// Handle for enqueueing records into a running delivery queue.
///
/// Cloning the handle is cheap; all clones feed the same drain task.
pub struct StatementQueue<T> {
    tx: mpsc::UnboundedSender<QueueItem<T>>,
    pending: Arc<watch::Sender<usize>>,
    failed: Arc<Mutex<Vec<T>>>,
    alive: watch::Receiver<()>,
}

impl<T> Clone for StatementQueue<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            pending: Arc::clone(&self.pending),
            failed: Arc::clone(&self.failed),
            alive: self.alive.clone(),
        }
    }
}

/// Join handle for the drain task.
///
/// The task exits once every [`StatementQueue`] clone has been dropped and
/// the remaining items are handled.
#[derive(Debug)]
pub struct DrainHandle {
    handle: JoinHandle<()>,
}

impl DrainHandle {
    /// Stop the drain task without handling the remaining items.
    ///
    /// Outstanding [`Flush`] barriers resolve with [`Error::Closed`].
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the drain task to finish.
    pub async fn join(self) -> Result<()> {
        self.handle
            .await
            .map_err(|e| Error::DrainTask(e.to_string()))
    }
}

impl<T> StatementQueue<T>
where
    T: Send + Sync + 'static,
{
    /// Spawn the drain task and return a handle to the queue.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(transport: Arc<dyn Transport<T>>, config: QueueConfig) -> (Self, DrainHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (pending, _) = watch::channel(0usize);
        let pending = Arc::new(pending);
        let failed = Arc::new(Mutex::new(Vec::new()));
        let (alive_tx, alive) = watch::channel(());

        let worker = DrainWorker {
            rx,
            transport,
            config,
            pending: Arc::clone(&pending),
            failed: Arc::clone(&failed),
            _alive: alive_tx,
        };
        let handle = tokio::spawn(worker.run());

        (
            Self {
                tx,
                pending,
                failed,
                alive,
            },
            DrainHandle { handle },
        )
    }

    /// Append a record or a flush marker to the tail of the queue.
    pub fn enqueue(&self, item: impl Into<QueueItem<T>>) -> Result<()> {
        let item = item.into();
        let is_marker = item.is_flush_marker();

        self.pending.send_modify(|n| *n += 1);
        if self.tx.send(item).is_err() {
            self.pending.send_modify(|n| *n = n.saturating_sub(1));
            return Err(Error::Closed);
        }

        debug!(flush_marker = is_marker, pending = self.pending_count(), "enqueued");
        Ok(())
    }

    /// Enqueue a flush marker and return a future that resolves once the
    /// pending count has returned to zero.
    pub fn flush(&self) -> Result<Flush> {
        let rx = self.pending.subscribe();
        self.enqueue(QueueItem::<T>::FlushMarker)?;
        Ok(Flush {
            rx,
            alive: self.alive.clone(),
        })
    }

    /// Number of items enqueued but not yet handled by the drain task.
    pub fn pending_count(&self) -> usize {
        *self.pending.borrow()
    }

    /// Whether every enqueued item has been handled.
    pub fn is_drained(&self) -> bool {
        self.pending_count() == 0
    }

    /// Subscribe to changes of the pending count.
    pub fn watch_pending(&self) -> watch::Receiver<usize> {
        self.pending.subscribe()
    }

    /// Close this handle and wait for the drain task to finish.
    ///
    /// Only returns once every other clone has been dropped as well.
    pub async fn shutdown(self, drain: DrainHandle) -> Result<()> {
        drop(self);
        drain.join().await
    }
}

impl<T> StatementQueue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Records the transport kept rejecting after all attempts.
    pub async fn failed(&self) -> Vec<T> {
        self.failed.lock().await.clone()
    }
}

/// Completion barrier returned by [`StatementQueue::flush`].
#[derive(Debug)]
pub struct Flush {
    rx: watch::Receiver<usize>,
    alive: watch::Receiver<()>,
}

impl Flush {
    /// Wait until the queue has no pending items.
    ///
    /// Fails with [`Error::Closed`] if the drain task stops first.
    pub async fn wait(mut self) -> Result<()> {
        loop {
            let drained = *self.rx.borrow_and_update() == 0;
            if drained {
                return Ok(());
            }
            tokio::select! {
                changed = self.rx.changed() => changed.map_err(|_| Error::Closed)?,
                // The drain task never sends on this channel, it only drops it.
                _ = self.alive.changed() => {
                    let drained = *self.rx.borrow() == 0;
                    return if drained { Ok(()) } else { Err(Error::Closed) };
                }
            }
        }
    }
}

impl IntoFuture for Flush {
    type Output = Result<()>;
    type IntoFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}

struct DrainWorker<T> {
    rx: mpsc::UnboundedReceiver<QueueItem<T>>,
    transport: Arc<dyn Transport<T>>,
    config: QueueConfig,
    pending: Arc<watch::Sender<usize>>,
    failed: Arc<Mutex<Vec<T>>>,
    _alive: watch::Sender<()>,
}

impl<T> DrainWorker<T>
where
    T: Send + Sync + 'static,
{
    async fn run(mut self) {
        debug!("statement drain started");

        while let Some(item) = self.rx.recv().await {
            match item {
                QueueItem::Statement(statement) => self.deliver(statement).await,
                QueueItem::FlushMarker => debug!("flush marker reached"),
            }
            self.pending.send_modify(|n| *n = n.saturating_sub(1));
        }

        debug!("statement queue closed, drain stopped");
    }

    async fn deliver(&self, statement: T) {
        let attempts = self.config.attempts();

        for attempt in 1..=attempts {
            match self.transport.send(&statement).await {
                Ok(()) => return,
                Err(e) if attempt < attempts => {
                    let delay = self.config.backoff_for(attempt);
                    warn!(attempt, ?delay, "statement delivery failed, retrying: {}", e);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!(attempts, "statement delivery failed, dead-lettering: {}", e);
                }
            }
        }

        self.failed.lock().await.push(statement);
    }
}
