//! Error types for the CMS and backend clients and the HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Errors raised while reading content from the CMS.
#[derive(Error, Debug)]
pub enum CmsError {
    /// HTTP transport failure.
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The CMS answered with a non-success status.
    #[error("Failed to fetch {endpoint}: {status}")]
    Status {
        /// Endpoint path that was requested.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// Invalid CMS base URL or endpoint.
    #[error("Invalid CMS URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body did not match the expected shape.
    #[error("Malformed CMS response for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A single-type entry that the page requires was absent.
    #[error("No {0} data found")]
    Empty(&'static str),
}

impl CmsError {
    /// HTTP status carried by the error, if the CMS answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised by calls to the backend API.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend did not answer within the allotted time.
    #[error("The server took too long to respond. Please try again later.")]
    Timeout,

    /// HTTP transport failure.
    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid backend base URL or endpoint.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error body, or a generic status message.
        message: String,
    },
}

impl BackendError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Http(err) => err.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias for CMS operations.
pub type CmsResult<T> = std::result::Result<T, CmsError>;

/// Result type alias for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors returned by fragment handlers.
#[derive(Error, Debug)]
pub enum ServerError {
    /// No project at the requested position.
    #[error("Project {0} not found")]
    ProjectNotFound(usize),

    /// Content needed for the response could not be loaded.
    #[error(transparent)]
    Content(#[from] CmsError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            Self::Content(err) => {
                error!(name: "server.content.failed", error = %err, "Content unavailable");
                StatusCode::BAD_GATEWAY
            }
        };
        (status, self.to_string()).into_response()
    }
}
