//! Fan-out bus for course events.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;

use super::CourseEvent;

/// Sequence number for events (monotonically increasing)
pub type EventSeq = u64;

/// Receiving end of an [`EventBus`] subscription.
pub type EventReceiver = mpsc::UnboundedReceiver<(EventSeq, CourseEvent)>;

/// In-process event bus between the player UI and its listeners.
///
/// Each subscriber owns an unbounded channel and sees every event published
/// after it subscribed. Events published while nobody is subscribed are
/// dropped.
#[derive(Default)]
pub struct EventBus {
    next_seq: AtomicU64,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<(EventSeq, CourseEvent)>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event, returns its sequence number
    pub fn publish(&self, event: CourseEvent) -> EventSeq {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Sequence is taken under the lock so every subscriber sees it in order
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);

        // Dropped receivers are pruned here
        subscribers.retain(|tx| tx.send((seq, event.clone())).is_ok());

        seq
    }

    /// Subscribe to all events from now
    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }
}
