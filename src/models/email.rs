//! Email message and delivery endpoint response types.

use serde::{Deserialize, Serialize};

/// One email as accepted by `POST /api/send-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Single recipient address
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            html: html.into(),
        }
    }
}

/// Body returned by the delivery endpoint, on success or failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message_id: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub details: Option<String>,
}

impl SendEmailResponse {
    /// Error text suitable for logs, combining `error` and `details`.
    pub fn error_message(&self) -> Option<String> {
        match (&self.error, &self.details) {
            (Some(error), Some(details)) => Some(format!("{}: {}", error, details)),
            (Some(error), None) => Some(error.clone()),
            (None, Some(details)) => Some(details.clone()),
            (None, None) => None,
        }
    }
}

/// Receipt for a message accepted by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider message id, when the endpoint returned one
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_to_wire_shape() {
        let message = EmailMessage::new("a@b.com", "Hi", "text", "<p>html</p>");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "to": "a@b.com",
                "subject": "Hi",
                "text": "text",
                "html": "<p>html</p>"
            })
        );
    }

    #[test]
    fn test_success_response() {
        let response: SendEmailResponse =
            serde_json::from_str(r#"{"success": true, "messageId": "<abc@mail>"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message_id.as_deref(), Some("<abc@mail>"));
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn test_failure_response() {
        let response: SendEmailResponse = serde_json::from_str(
            r#"{"success": false, "error": "Failed to send email", "details": "535 auth"}"#,
        )
        .unwrap();
        assert!(!response.success);
        assert_eq!(
            response.error_message().as_deref(),
            Some("Failed to send email: 535 auth")
        );
    }
}
