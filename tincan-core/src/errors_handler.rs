//! Routes fatal tracking errors to the player's error view.
//!
//! The handler is one-shot per navigation: once the location points at the
//! error view, further errors are ignored until the learner navigates away.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Route fragment that marks the error view.
pub const ERROR_ROUTE: &str = "xapierror";

/// Messages the error view can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
pub enum ErrorMessage {
    #[error("Invalid endpoint")]
    InvalidEndpoint,
    #[error("Not found endpoint")]
    NotFoundEndpoint,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid e-mail")]
    InvalidEmail,
    #[error("Invalid protocol")]
    InvalidProtocol,
    #[error("XDomainRequest error")]
    XDomainRequestError,
    #[error("Timeout error")]
    TimeoutError,
    #[error("Bad request")]
    BadRequest,
    #[error("Unhandled error")]
    UnhandledMessage,
    #[error("Verb object is not well formed")]
    VerbIsIncorrect,
    #[error("Actor data is incorrect")]
    ActorDataIsIncorrect,
    #[error("Request failed: Not enough data in the settings")]
    NotEnoughDataInSettings,
}

/// Current location of the player, as a URL fragment.
pub trait Location: Send + Sync {
    /// Fragment including the leading `#`, or empty.
    fn hash(&self) -> String;
}

/// Location held in memory and updated by the router.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    hash: RwLock<String>,
}

impl MemoryLocation {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: RwLock::new(hash.into()),
        }
    }

    pub fn set(&self, hash: impl Into<String>) {
        if let Ok(mut current) = self.hash.write() {
            *current = hash.into();
        }
    }
}

impl Location for MemoryLocation {
    fn hash(&self) -> String {
        self.hash.read().map(|h| h.clone()).unwrap_or_default()
    }
}

/// Request to navigate to the error view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorNavigation {
    /// `xapierror/` followed by the URL-encoded previous fragment
    pub navigate_url: String,
    pub error: ErrorMessage,
}

/// Publishes error-view navigations for the router to follow.
pub struct ErrorsHandler {
    location: Arc<dyn Location>,
    tx: broadcast::Sender<ErrorNavigation>,
}

impl ErrorsHandler {
    /// Default channel capacity for navigation requests.
    pub const DEFAULT_CAPACITY: usize = 16;

    pub fn new(location: Arc<dyn Location>) -> Self {
        let (tx, _) = broadcast::channel(Self::DEFAULT_CAPACITY);
        Self { location, tx }
    }

    /// Subscribe to navigation requests.
    pub fn subscribe(&self) -> broadcast::Receiver<ErrorNavigation> {
        self.tx.subscribe()
    }

    /// Redirect to the error view unless the player is already there.
    ///
    /// Returns the published navigation, or `None` when suppressed.
    pub fn handle_error(&self, error: ErrorMessage) -> Option<ErrorNavigation> {
        let hash = self.location.hash();
        if hash.contains(ERROR_ROUTE) {
            debug!(%error, "already on error view, ignoring");
            return None;
        }

        let previous = hash.strip_prefix('#').unwrap_or(&hash);
        let navigation = ErrorNavigation {
            navigate_url: format!("{}/{}", ERROR_ROUTE, encode_component(previous)),
            error,
        };

        warn!(%error, navigate_url = %navigation.navigate_url, "surfacing tracking error");

        // No router listening is not an error
        let _ = self.tx.send(navigation.clone());
        Some(navigation)
    }
}

/// Percent-encode a route segment with the `encodeURIComponent` set.
///
/// `urlencoding` only leaves `-_.~` unescaped; the player router also
/// expects `!'()*` verbatim.
fn encode_component(segment: &str) -> String {
    let mut encoded = urlencoding::encode(segment).into_owned();
    for (escaped, mark) in [
        ("%21", "!"),
        ("%27", "'"),
        ("%28", "("),
        ("%29", ")"),
        ("%2A", "*"),
    ] {
        encoded = encoded.replace(escaped, mark);
    }
    encoded
}
