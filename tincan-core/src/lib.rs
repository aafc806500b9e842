//! tincan-core: xAPI statement assembly for the tincan course player
//!
//! This crate turns learner actions into xAPI statements and hands them to
//! an ordered delivery queue:
//!
//! - **Model** - [`model`] value objects serializing to xAPI JSON
//! - **Assembler** - [`StatementAssembler`] with one encoder per question type
//! - **Filter** - [`VerbFilter`] allow-list applied before enqueueing
//! - **Provider** - [`ActivityProvider`] binding a session to the queue
//! - **Errors** - [`ErrorsHandler`] routing fatal errors to the error view
//!
//! # Architecture
//!
//! ```text
//!  EventBus ──► ActivityProvider ──► StatementAssembler ──► VerbFilter
//!                     │                                        │
//!                     └── ErrorsHandler (guards, settings)     ▼
//!                                                       StatementQueue ──► Transport
//! ```

pub mod assembler;
pub mod course;
pub mod duration;
pub mod error;
pub mod errors_handler;
pub mod events;
pub mod filter;
pub mod guard;
pub mod model;
pub mod provider;
pub mod session;
pub mod settings;

// Re-export key types for convenience
pub use assembler::{EncodedInteraction, StatementAssembler, encode};
pub use course::{Course, InMemoryObjectiveRepository, Objective, ObjectiveRepository, Question};
pub use error::{ConfigurationError, DispatchError, PreconditionError, TincanError};
pub use errors_handler::{ErrorMessage, ErrorNavigation, ErrorsHandler, Location, MemoryLocation};
pub use events::{CourseEvent, EventBus, EventReceiver, EventSeq};
pub use filter::VerbFilter;
pub use model::{Actor, KnownVerb, Statement};
pub use provider::ActivityProvider;
pub use session::Session;
pub use settings::{DEFAULT_LANGUAGE, XapiSettings};
