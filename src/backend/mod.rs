//! Backend API client.
//!
//! The backend hosts the chatbot and the contact email relay. All calls are
//! JSON POSTs bounded by a timeout; an elapsed timeout surfaces as
//! [`BackendError::Timeout`](crate::error::BackendError::Timeout) so callers
//! can tell it apart from other failures.
//!
//! # Architecture
//!
//! - [`BackendClient`]: reqwest-based client for `/chatbot` and `/email`
//! - [`ChatBackend`]: The seam the chat widget talks to
//! - [`types`]: Wire types

mod client;
pub mod types;

pub use client::{BackendClient, CHAT_TIMEOUT, DEFAULT_TIMEOUT};
pub(crate) use client::normalize_base;
pub use types::{ChatAnswer, ChatRequest, ContactForm, ContactReceipt};

use async_trait::async_trait;

use crate::error::BackendResult;
use crate::session::SessionContext;

/// Something that can answer chat questions.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Answer `question` for the visitor identified by `session`.
    async fn ask(&self, session: &SessionContext, question: &str) -> BackendResult<String>;
}

#[async_trait]
impl ChatBackend for BackendClient {
    async fn ask(&self, session: &SessionContext, question: &str) -> BackendResult<String> {
        let answer = self.send_chat_message(session, question).await?;
        Ok(answer.answer)
    }
}
