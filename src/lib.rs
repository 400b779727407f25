//! Portfolio Site
//!
//! A server-rendered personal portfolio: content comes from a headless CMS,
//! a chat widget relays questions to an AI backend, and the contact form is
//! forwarded to the same backend. Pages stay HTML-first; HTMX and a few web
//! components provide interactivity.
//!
//! # Modules
//!
//! - [`carousel`]: Infinite carousel model (auto-scroll, drag, momentum)
//! - [`chat`]: Chat widget state machine
//! - [`cms`]: CMS fetch layer and content normalization
//! - [`backend`]: AI backend client (chat and contact)
//! - [`markdown`]: Project detail document loading with fallback
//! - [`session`]: Per-visitor session identity and chat storage
//! - [`ui`]: HTML pages and HTMX fragments
//! - [`server`]: Axum router and server bootstrap

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::assigning_clones)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod backend;
pub mod carousel;
pub mod chat;
pub mod cms;
pub mod config;
pub mod error;
pub mod markdown;
pub mod server;
pub mod session;
pub mod ui;

use std::fmt;
use std::sync::Arc;

use backend::{BackendClient, ChatBackend};
use cms::CmsClient;
use config::AppConfig;
use markdown::MarkdownLoader;
use server::SimpleRateLimiter;
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// CMS content client.
    pub cms: Arc<CmsClient>,
    /// Backend client for the contact form.
    pub backend: Arc<BackendClient>,
    /// Answers chat questions. Usually the same client as `backend`.
    pub chat_backend: Arc<dyn ChatBackend>,
    /// Chat sessions keyed by visitor cookie.
    pub sessions: SessionStore,
    /// Loader for project detail documents.
    pub markdown: Arc<MarkdownLoader>,
    /// Token bucket for the form endpoints.
    pub rate_limiter: Arc<SimpleRateLimiter>,
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cms", &self.cms)
            .field("backend", &self.backend)
            .field("sessions", &self.sessions.len())
            .field("config", &self.config)
            .finish()
    }
}
