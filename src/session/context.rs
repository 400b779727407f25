//! Visitor session identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Identifies one visitor across chat turns.
///
/// Created once per visitor and handed to whatever needs to correlate
/// requests with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionContext {
    id: String,
}

impl SessionContext {
    /// Start a new session with a random id.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }

    /// Rebuild a session from a previously issued id.
    ///
    /// Returns `None` unless `id` is a UUID, so arbitrary cookie contents
    /// never reach the backend.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Uuid::parse_str(id.trim()).ok().map(|uuid| Self {
            id: uuid.to_string(),
        })
    }

    /// Reuse `existing` if valid, otherwise generate a fresh session.
    ///
    /// The flag is `true` when a new session was created.
    #[must_use]
    pub fn resume_or_generate(existing: Option<&str>) -> (Self, bool) {
        match existing.and_then(Self::from_id) {
            Some(session) => (session, false),
            None => (Self::generate(), true),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}
