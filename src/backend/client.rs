//! HTTP client for the backend API.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use super::types::{ChatAnswer, ChatRequest, ContactForm, ContactReceipt, ErrorBody};
use crate::error::{BackendError, BackendResult};
use crate::session::SessionContext;

/// Time allowed for the chatbot to answer.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(15);

/// Time allowed for non-chat calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the chatbot and email endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    http: reqwest::Client,
    chat_timeout: Duration,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> BackendResult<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> BackendResult<Self> {
        Ok(Self {
            base_url: normalize_base(base_url.as_ref())?,
            http,
            chat_timeout: CHAT_TIMEOUT,
        })
    }

    /// Override the chatbot timeout.
    #[must_use]
    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn chat_timeout(&self) -> Duration {
        self.chat_timeout
    }

    /// Ask the chatbot a question on behalf of `session`.
    pub async fn send_chat_message(
        &self,
        session: &SessionContext,
        message: &str,
    ) -> BackendResult<ChatAnswer> {
        let body = ChatRequest {
            message: message.to_string(),
            session_id: session.id().to_string(),
        };
        self.post_json("chatbot/send-message", &body, self.chat_timeout)
            .await
    }

    /// Forward the contact form to the email endpoint.
    pub async fn send_contact(&self, form: &ContactForm) -> BackendResult<ContactReceipt> {
        self.post_json("email/contact", form, DEFAULT_TIMEOUT).await
    }

    /// POST a JSON body and decode the JSON answer, giving up after `timeout`.
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B, timeout: Duration) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        debug!(name: "backend.request", url = %url, "POST");

        let request = async {
            let response = self.http.post(url.clone()).json(body).send().await?;
            Self::handle_response(response).await
        };

        match tokio::time::timeout(timeout, request).await {
            Ok(Err(BackendError::Http(err))) if err.is_timeout() => Err(BackendError::Timeout),
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(
                    name: "backend.timeout",
                    url = %url,
                    timeout_ms = timeout.as_millis() as u64,
                    "Backend did not answer in time"
                );
                Err(BackendError::Timeout)
            }
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> BackendResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .map(|detail| match detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            });

        Err(BackendError::Api {
            status: status.as_u16(),
            message: detail
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16())),
        })
    }
}

/// Ensure the base URL ends with `/` so relative joins keep its path.
pub(crate) fn normalize_base(base: &str) -> Result<Url, url::ParseError> {
    let trimmed = base.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}
