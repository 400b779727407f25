//! Per-visitor chat state and the store that holds it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::SessionContext;
use crate::chat::{ChatError, ChatLog, ChatMessage, MessageId, PendingTurn};
use crate::error::BackendError;

/// Default session timeout (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Chat state of one visitor.
///
/// Cloning is cheap and yields a handle to the same conversation.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    context: SessionContext,
    log: RwLock<ChatLog>,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl Session {
    fn new(context: SessionContext, greeting: &str) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                context,
                log: RwLock::new(ChatLog::with_greeting(greeting)),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.inner.context
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.inner.context.id()
    }

    /// Snapshot of the conversation.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.read_log(|log| log.messages().to_vec())
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.read_log(ChatLog::is_waiting)
    }

    /// Accept a user message; see [`ChatLog::submit`].
    pub fn submit(&self, text: &str) -> Result<PendingTurn, ChatError> {
        let turn = self.write_log(|log| log.submit(text));
        self.touch();
        turn
    }

    /// Replace a placeholder with the backend outcome; see [`ChatLog::resolve`].
    pub fn resolve(&self, pending_id: MessageId, outcome: Result<String, BackendError>) -> bool {
        let replaced = self.write_log(|log| log.resolve(pending_id, outcome));
        self.touch();
        replaced
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Check if the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative durations mean clock skew; treat as fresh.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle >= timeout)
    }

    fn read_log<R>(&self, f: impl FnOnce(&ChatLog) -> R) -> R {
        let guard = self.inner.log.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write_log<R>(&self, f: impl FnOnce(&mut ChatLog) -> R) -> R {
        let mut guard = self
            .inner
            .log
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Record visitor activity, postponing expiry.
    pub fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }
}

/// Thread-safe store of visitor sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
    greeting: String,
}

impl SessionStore {
    /// Create a store whose conversations open with `greeting`.
    #[must_use]
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
                greeting: greeting.into(),
            }),
        }
    }

    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.inner.greeting
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Get the session for `context`, creating it if it doesn't exist.
    #[must_use]
    pub fn get_or_create(&self, context: &SessionContext) -> Session {
        self.get_or_create_with_greeting(context, &self.inner.greeting)
    }

    /// Like [`get_or_create`](Self::get_or_create), but a new conversation
    /// opens with `greeting` instead of the store default.
    #[must_use]
    pub fn get_or_create_with_greeting(&self, context: &SessionContext, greeting: &str) -> Session {
        if let Some(session) = self.get(context.id()) {
            return session;
        }

        let mut guard = self
            .inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard
            .entry(context.id().to_string())
            .or_insert_with(|| Session::new(context.clone(), greeting))
            .clone()
    }

    /// Remove a session by ID.
    pub fn remove(&self, id: &str) -> Option<Session> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions idle longer than the timeout.
    ///
    /// Sessions still waiting on the backend are kept. Returns the number of
    /// sessions removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self
            .inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, session| session.is_waiting() || !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageKind;

    #[test]
    fn test_session_lifecycle() {
        let store = SessionStore::new("Hi!");
        assert!(store.is_empty());

        let context = SessionContext::generate();
        let session = store.get_or_create(&context);
        assert_eq!(store.len(), 1);
        assert_eq!(session.id(), context.id());
        assert_eq!(session.messages()[0].text, "Hi!");

        let again = store.get_or_create(&context);
        let turn = again.submit("hello").unwrap();
        assert!(session.is_waiting());
        assert!(session.resolve(turn.pending_id, Ok("hey".into())));
        assert_eq!(session.messages()[2].kind, MessageKind::Ai);

        store.remove(context.id());
        assert!(store.is_empty());
    }

    #[test]
    fn test_cleanup_keeps_waiting_sessions() {
        let store = SessionStore::new("Hi!");
        let idle = store.get_or_create(&SessionContext::generate());
        let busy = store.get_or_create(&SessionContext::generate());
        busy.submit("still thinking?").unwrap();

        assert_eq!(store.cleanup_expired_with_timeout(Duration::ZERO), 1);
        assert!(store.get(idle.id()).is_none());
        assert!(store.get(busy.id()).is_some());
    }

    #[test]
    fn test_custom_greeting_only_for_new_sessions() {
        let store = SessionStore::new("Hi!");
        let context = SessionContext::generate();
        let session = store.get_or_create_with_greeting(&context, "Bonjour !");
        assert_eq!(session.messages()[0].text, "Bonjour !");

        let again = store.get_or_create_with_greeting(&context, "Hola");
        assert_eq!(again.messages()[0].text, "Bonjour !");
    }

    #[test]
    fn test_touch_postpones_expiry() {
        let store = SessionStore::new("Hi!");
        let session = store.get_or_create(&SessionContext::generate());
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert!(session.is_expired_with_timeout(Duration::from_millis(20)));

        session.touch();
        assert!(!session.is_expired_with_timeout(Duration::from_secs(5)));
        assert_eq!(store.cleanup_expired_with_timeout(Duration::from_secs(5)), 0);
    }
}
