//! Ordered statement delivery for tincan.
//!
//! This crate buffers outgoing records in a FIFO queue and drains them,
//! one at a time, into a [`Transport`]. A flush marker can be enqueued so
//! callers can wait for every record enqueued before it to be delivered.
//!
//! # Key Types
//!
//! - [`StatementQueue`] - Handle for enqueueing records and observing the pending count
//! - [`Transport`] - Trait for the outbound side the queue drains into
//! - [`InMemoryTransport`] - Recording transport for tests
//! - [`JsonLinesTransport`] - Writes one JSON document per line to any async writer

pub mod config;
pub mod error;
pub mod jsonl;
pub mod memory;
pub mod queue;
pub mod traits;

// Re-exports
pub use config::QueueConfig;
pub use error::{Error, Result};
pub use jsonl::JsonLinesTransport;
pub use memory::InMemoryTransport;
pub use queue::{DrainHandle, Flush, StatementQueue};
pub use traits::{QueueItem, Transport};
