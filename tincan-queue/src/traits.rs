//! Core traits for statement delivery.

use async_trait::async_trait;

/// An entry in the delivery queue.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueItem<T> {
    /// A record to hand to the transport.
    Statement(T),
    /// Carries no payload. Once the pending count drops to zero after this
    /// marker was enqueued, everything enqueued before it has been handled.
    FlushMarker,
}

impl<T> QueueItem<T> {
    /// Whether this item is the flush marker.
    pub fn is_flush_marker(&self) -> bool {
        matches!(self, Self::FlushMarker)
    }
}

impl<T> From<T> for QueueItem<T> {
    fn from(statement: T) -> Self {
        Self::Statement(statement)
    }
}

/// Outbound side of the queue.
///
/// The queue calls `send` for one record at a time and waits for it to
/// complete before sending the next.
#[async_trait]
pub trait Transport<T>: Send + Sync {
    /// Deliver a single record.
    async fn send(&self, statement: &T) -> crate::Result<()>;
}
