//! xAPI value objects.
//!
//! Every type here is immutable once built and serializes to the xAPI 1.0
//! JSON shape (`camelCase` keys, `objectType` discriminators).

pub mod activity;
pub mod actor;
pub mod context;
pub mod language_map;
pub mod result;
pub mod statement;
pub mod verb;

pub use activity::{
    Activity, ActivityDefinition, InteractionComponent, InteractionDefinition, InteractionType,
    ITEM_SEPARATOR, PAIR_SEPARATOR,
};
pub use actor::Actor;
pub use context::{COURSE_ID_EXTENSION, Context, ContextActivities};
pub use language_map::LanguageMap;
pub use result::{Score, StatementResult};
pub use statement::Statement;
pub use verb::{KnownVerb, Verb};
