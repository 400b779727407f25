//! Ordered chat log with a single pending placeholder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::BackendError;

/// Who (or what) produced a chat bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
    /// "Typing" placeholder while the backend is answering.
    Pending,
    Error,
}

/// Identifier assigned to every message when it enters the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub kind: MessageKind,
    pub text: String,
}

/// A question that has been shown to the user and awaits an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub user_id: MessageId,
    pub pending_id: MessageId,
    pub question: String,
}

/// Why a message was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a previous message is still waiting for an answer")]
    Busy,
}

/// Text shown in place of an answer when the backend fails without a timeout.
pub const UNAVAILABLE_MESSAGE: &str = "Sorry, I can't answer right now.";

/// Conversation shown in the chat widget.
///
/// Messages are only ever appended; the pending placeholder is replaced in
/// place, looked up by its [`MessageId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: Option<MessageId>,
}

impl ChatLog {
    /// Start a conversation with the assistant's greeting.
    #[must_use]
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut log = Self::empty();
        log.push(MessageKind::Ai, greeting.into());
        log
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Id of the outstanding placeholder, if any.
    #[must_use]
    pub fn pending(&self) -> Option<MessageId> {
        self.pending
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Accept a user message.
    ///
    /// Appends the trimmed text followed by a pending placeholder. Only one
    /// turn may be outstanding at a time.
    pub fn submit(&mut self, text: &str) -> Result<PendingTurn, ChatError> {
        let question = text.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.pending.is_some() {
            return Err(ChatError::Busy);
        }

        let user_id = self.push(MessageKind::User, question.to_string());
        let pending_id = self.push(MessageKind::Pending, String::new());
        self.pending = Some(pending_id);

        Ok(PendingTurn {
            user_id,
            pending_id,
            question: question.to_string(),
        })
    }

    /// Replace the placeholder `pending_id` with the backend outcome.
    ///
    /// Returns `false` if the id is unknown or was already resolved.
    pub fn resolve(&mut self, pending_id: MessageId, outcome: Result<String, BackendError>) -> bool {
        let (kind, text) = match outcome {
            Ok(answer) => (MessageKind::Ai, answer),
            Err(err) => (MessageKind::Error, failure_text(&err)),
        };
        self.replace_pending(pending_id, kind, text)
    }

    fn replace_pending(&mut self, pending_id: MessageId, kind: MessageKind, text: String) -> bool {
        let Some(message) = self
            .messages
            .iter_mut()
            .find(|m| m.id == pending_id && m.kind == MessageKind::Pending)
        else {
            return false;
        };
        message.kind = kind;
        message.text = text;
        if self.pending == Some(pending_id) {
            self.pending = None;
        }
        true
    }

    fn push(&mut self, kind: MessageKind, text: String) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage { id, kind, text });
        id
    }
}

/// User-facing text for a failed backend call.
#[must_use]
pub fn failure_text(err: &BackendError) -> String {
    if err.is_timeout() {
        BackendError::Timeout.to_string()
    } else {
        UNAVAILABLE_MESSAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(log: &ChatLog) -> Vec<MessageKind> {
        log.messages().iter().map(|m| m.kind).collect()
    }

    #[test]
    fn test_submit_appends_user_then_pending() {
        let mut log = ChatLog::with_greeting("Hello!");
        let turn = log.submit("  What do you build?  ").unwrap();

        assert_eq!(
            kinds(&log),
            [MessageKind::Ai, MessageKind::User, MessageKind::Pending]
        );
        assert_eq!(log.get(turn.user_id).unwrap().text, "What do you build?");
        assert_eq!(turn.question, "What do you build?");
        assert_eq!(log.pending(), Some(turn.pending_id));
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut log = ChatLog::with_greeting("Hello!");
        assert_eq!(log.submit("   \n"), Err(ChatError::EmptyMessage));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_second_send_ignored_while_pending() {
        let mut log = ChatLog::with_greeting("Hello!");
        log.submit("first").unwrap();
        assert_eq!(log.submit("second"), Err(ChatError::Busy));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_success_replaces_placeholder_in_place() {
        let mut log = ChatLog::with_greeting("Hello!");
        let before: Vec<_> = log.messages().to_vec();
        let turn = log.submit("Skills?").unwrap();

        assert!(log.resolve(turn.pending_id, Ok("Rust and Python".into())));

        let messages = log.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], before[0]);
        assert_eq!(messages[1].kind, MessageKind::User);
        assert_eq!(messages[2].id, turn.pending_id);
        assert_eq!(messages[2].kind, MessageKind::Ai);
        assert_eq!(messages[2].text, "Rust and Python");
        assert!(!log.is_waiting());
    }

    #[test]
    fn test_resolve_is_at_most_once() {
        let mut log = ChatLog::with_greeting("Hello!");
        let turn = log.submit("Skills?").unwrap();
        assert!(log.resolve(turn.pending_id, Ok("first".into())));
        assert!(!log.resolve(turn.pending_id, Ok("second".into())));
        assert_eq!(log.get(turn.pending_id).unwrap().text, "first");
    }

    #[test]
    fn test_resolve_unknown_id_is_noop() {
        let mut log = ChatLog::with_greeting("Hello!");
        log.submit("Skills?").unwrap();
        assert!(!log.resolve(MessageId(99), Ok("nope".into())));
        assert!(log.is_waiting());
    }

    #[test]
    fn test_timeout_becomes_error_bubble() {
        let mut log = ChatLog::with_greeting("Hello!");
        let turn = log.submit("Skills?").unwrap();
        assert!(log.resolve(turn.pending_id, Err(BackendError::Timeout)));

        let message = log.get(turn.pending_id).unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.contains("too long"));

        // Conversation can continue after an error.
        assert!(log.submit("Again?").is_ok());
    }

    #[test]
    fn test_api_failure_uses_generic_text() {
        let mut log = ChatLog::empty();
        let turn = log.submit("Skills?").unwrap();
        let err = BackendError::Api {
            status: 500,
            message: "boom".into(),
        };
        log.resolve(turn.pending_id, Err(err));
        assert_eq!(log.get(turn.pending_id).unwrap().text, UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_ids_are_unique_across_turns() {
        let mut log = ChatLog::with_greeting("Hello!");
        let a = log.submit("one").unwrap();
        log.resolve(a.pending_id, Ok("1".into()));
        let b = log.submit("two").unwrap();
        let mut ids: Vec<_> = log.messages().iter().map(|m| m.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(b.user_id > a.pending_id);
    }
}
