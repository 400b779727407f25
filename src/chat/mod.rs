//! Chat widget state.
//!
//! A message moves through `sent → pending → answered | errored`. Sending
//! appends the user's message and a "typing" placeholder; the backend's
//! answer (or a readable error) later replaces that placeholder in place.
//! Only one question may be outstanding at a time.
//!
//! # Architecture
//!
//! - [`ChatLog`]: Ordered messages and the pending-turn bookkeeping
//! - [`ChatSession`]: A log bound to a [`ChatBackend`](crate::backend::ChatBackend)
//!   and a visitor session

mod log;
mod session;

pub use log::{
    ChatError, ChatLog, ChatMessage, MessageId, MessageKind, PendingTurn, UNAVAILABLE_MESSAGE,
    failure_text,
};
pub use session::{ChatSession, answer_turn};
