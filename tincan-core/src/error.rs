//! Error types for tincan-core

use thiserror::Error;

use crate::errors_handler::ErrorMessage;

/// Top-level error type for tincan-core
#[derive(Error, Debug)]
pub enum TincanError {
    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Actor data is incorrect: name {name:?}, email {email:?}")]
    InvalidActor { name: String, email: String },

    #[error("Actor is not initialized; activate the provider first")]
    ActorNotInitialized,

    #[error("Queue error: {0}")]
    Queue(#[from] tincan_queue::Error),
}

impl TincanError {
    /// Message shown on the error view when this error is surfaced.
    ///
    /// Dispatch and queue errors are never surfaced and return `None`.
    pub fn error_message(&self) -> Option<ErrorMessage> {
        match self {
            Self::Configuration(_) => Some(ErrorMessage::NotEnoughDataInSettings),
            Self::InvalidActor { .. } | Self::ActorNotInitialized => {
                Some(ErrorMessage::ActorDataIsIncorrect)
            }
            Self::Precondition(_) => Some(ErrorMessage::UnhandledMessage),
            Self::Dispatch(_) | Self::Queue(_) => None,
        }
    }
}

/// A domain payload failed shape validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PreconditionError {
    pub message: String,
}

impl PreconditionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Required settings are missing or invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Not enough data in the settings: {0} is not configured")]
    Missing(&'static str),

    #[error("Unknown verb in settings: {0}")]
    UnknownVerb(String),
}

/// A question-answered statement could not be produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("{0}")]
    Precondition(#[from] PreconditionError),
}
