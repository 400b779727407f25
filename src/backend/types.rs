//! Request and response bodies exchanged with the backend API.

use serde::{Deserialize, Serialize};

/// Body of `POST /chatbot/send-message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Answer returned by the chatbot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// Echo of the question. The backend names this `message` in some versions.
    #[serde(alias = "message", default)]
    pub question: String,
    pub answer: String,
}

/// Contact form fields, sent to `POST /email/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Names of required fields left blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Acknowledgement returned by the email endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub message: String,
}

/// Error body shape used by the backend (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_uses_camel_case() {
        let body = serde_json::to_value(ChatRequest {
            message: "hi".into(),
            session_id: "abc".into(),
        })
        .unwrap();
        assert_eq!(body["sessionId"], "abc");
    }

    #[test]
    fn test_chat_answer_accepts_message_alias() {
        let answer: ChatAnswer =
            serde_json::from_str(r#"{"message":"hi","answer":"hello"}"#).unwrap();
        assert_eq!(answer.question, "hi");
        assert_eq!(answer.answer, "hello");
    }

    #[test]
    fn test_missing_fields() {
        let form = ContactForm {
            first_name: "Ada".into(),
            email: " ".into(),
            ..Default::default()
        };
        assert_eq!(form.missing_fields(), ["lastName", "email", "message"]);
    }
}
