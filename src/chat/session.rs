//! A conversation bound to a backend and a visitor session.

use std::sync::Arc;

use tracing::{info, warn};

use super::log::{ChatError, ChatLog, ChatMessage, PendingTurn};
use crate::backend::ChatBackend;
use crate::error::BackendError;
use crate::session::SessionContext;

/// Run the backend round-trip for `turn`.
pub async fn answer_turn(
    backend: &dyn ChatBackend,
    context: &SessionContext,
    turn: &PendingTurn,
) -> Result<String, BackendError> {
    let result = backend.ask(context, &turn.question).await;
    match &result {
        Ok(_) => info!(
            name: "chat.answered",
            session_id = %context,
            pending_id = %turn.pending_id,
            "Chat answer received"
        ),
        Err(err) => warn!(
            name: "chat.failed",
            session_id = %context,
            pending_id = %turn.pending_id,
            timeout = err.is_timeout(),
            error = %err,
            "Chat request failed"
        ),
    }
    result
}

/// Chat widget state driven end to end: submit, ask the backend, resolve.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    context: SessionContext,
    log: ChatLog,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("context", &self.context)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Open a conversation for `context` that starts with `greeting`.
    pub fn new(backend: Arc<dyn ChatBackend>, context: SessionContext, greeting: &str) -> Self {
        Self {
            backend,
            context,
            log: ChatLog::with_greeting(greeting),
        }
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        self.log.messages()
    }

    #[must_use]
    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Send `text` and wait for the placeholder to be resolved.
    ///
    /// Returns the finished turn; the outcome is read from the log.
    pub async fn send(&mut self, text: &str) -> Result<PendingTurn, ChatError> {
        let turn = self.log.submit(text)?;
        let outcome = answer_turn(self.backend.as_ref(), &self.context, &turn).await;
        self.log.resolve(turn.pending_id, outcome);
        Ok(turn)
    }
}
