//! Visitor sessions.
//!
//! Each visitor is identified by a random [`SessionContext`] carried in a
//! cookie. The server keeps the visitor's chat log in a [`Session`] held by
//! the [`SessionStore`].
//!
//! # Example
//!
//! ```rust
//! use portfolio_site::session::{SessionContext, SessionStore};
//!
//! let store = SessionStore::new("Hello!");
//! let session = store.get_or_create(&SessionContext::generate());
//! session.submit("What are you working on?").unwrap();
//!
//! assert_eq!(session.messages().len(), 3);
//! assert!(session.is_waiting());
//! ```

mod context;
mod store;

pub use context::{SESSION_COOKIE, SessionContext};
pub use store::{DEFAULT_SESSION_TIMEOUT, Session, SessionStore};
