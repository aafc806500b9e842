//! Inbound course events published by the player UI.

mod bus;
mod types;

pub use bus::{EventBus, EventReceiver, EventSeq};
pub use types::CourseEvent;
