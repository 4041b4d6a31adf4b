//! HTTP client for the email delivery endpoint.
//!
//! This module provides a synchronous HTTP client that can be used from async
//! contexts via `tokio::task::spawn_blocking`. It makes exactly one request
//! per call; retrying and cancellation are handled by [`crate::delivery`].

mod async_wrapper;
pub use async_wrapper::{AsyncEmailClient, AsyncEmailClientImpl};

use crate::config::Config;
use crate::error::{DeliveryError, DeliveryResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{EmailMessage, HealthStatus, SendEmailResponse, SendReceipt};
use std::sync::Arc;
use std::time::Duration;

/// Path of the send endpoint, relative to the base URL.
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Path of the health endpoint, relative to the base URL.
pub const HEALTH_PATH: &str = "/api/health";

/// HTTP client for the email delivery endpoint.
///
/// Each request is bounded by the agent's connect and overall timeouts, so
/// a blocking call abandoned by a cancelled submission still ends. The time
/// budget of a submission as a whole is enforced by cancelling it.
#[derive(Clone)]
pub struct EmailClient {
    /// Base URL of the delivery endpoint
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl EmailClient {
    /// Create a new EmailClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.email_api_url.clone(),
            agent: Arc::new(build_agent(
                Duration::from_secs(config.connect_timeout),
                Duration::from_secs(config.request_timeout),
            )),
            metrics: Metrics::new(),
        }
    }

    /// Create an EmailClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            agent: Arc::new(build_agent(
                Duration::from_secs(5),
                Duration::from_secs(10),
            )),
            metrics: Metrics::new(),
        }
    }

    /// Replace the overall per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.agent = Arc::new(build_agent(timeout.min(Duration::from_secs(5)), timeout));
        self
    }

    /// Share a metrics collector with other components.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request.
    fn get(&self, path: &str) -> DeliveryResult<ureq::Response> {
        let timer = HttpTimer::start(self.metrics.clone());
        let url = self.build_url(path);

        let result = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| self.map_error(e))
            .and_then(Self::require_success);

        timer.finish(result.is_ok());
        result
    }

    /// Execute a POST request with a JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> DeliveryResult<ureq::Response> {
        let timer = HttpTimer::start(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e))
            .and_then(Self::require_success);

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
            }
            Err(e) => {
                tracing::debug!("POST {} - Error: {}", url, e);
            }
        }
        timer.finish(result.is_ok());

        result
    }

    /// Anything outside 2xx is a failure, whatever the body says.
    fn require_success(response: ureq::Response) -> DeliveryResult<ureq::Response> {
        let status = response.status();
        if (200..300).contains(&status) {
            return Ok(response);
        }
        let message = response
            .into_string()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(DeliveryError::ApiError {
            status,
            message: Self::error_message_from_body(message),
        })
    }

    /// Prefer the endpoint's `error`/`details` fields over the raw body.
    fn error_message_from_body(body: String) -> String {
        serde_json::from_str::<SendEmailResponse>(&body)
            .ok()
            .and_then(|r| r.error_message())
            .unwrap_or(body)
    }

    /// Map a ureq error to a DeliveryError.
    fn map_error(&self, error: ureq::Error) -> DeliveryError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                DeliveryError::ApiError {
                    status: code,
                    message: Self::error_message_from_body(message),
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    DeliveryError::HttpError("Connection failed".to_string())
                } else if is_timeout(&transport) {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Send one email. No retries.
    pub fn send_email(&self, message: &EmailMessage) -> DeliveryResult<SendReceipt> {
        let body = serde_json::to_value(message)?;
        let response = self.post(SEND_EMAIL_PATH, &body)?;
        let response_body = response
            .into_string()
            .map_err(|e| DeliveryError::HttpError(e.to_string()))?;

        // A 2xx counts as delivered even if the body is not what we expect
        let message_id = match serde_json::from_str::<SendEmailResponse>(&response_body) {
            Ok(parsed) => parsed.message_id,
            Err(e) => {
                tracing::debug!("Unparseable send-email response body: {}", e);
                None
            }
        };

        Ok(SendReceipt { message_id })
    }

    /// Check that the delivery endpoint is up.
    pub fn health(&self) -> DeliveryResult<HealthStatus> {
        let response = self.get(HEALTH_PATH)?;
        let body = response
            .into_string()
            .map_err(|e| DeliveryError::HttpError(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn build_agent(connect: Duration, request: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(connect)
        .timeout(request)
        .build()
}

/// Whether a transport error is an elapsed connect or read deadline rather
/// than some other I/O failure such as a reset connection.
fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .is_some_and(|e| {
            matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = EmailClient::with_base_url("http://localhost:5000/".to_string());
        assert_eq!(
            client.build_url(SEND_EMAIL_PATH),
            "http://localhost:5000/api/send-email"
        );
    }

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"success": false, "error": "Missing required fields"}"#.to_string();
        assert_eq!(
            EmailClient::error_message_from_body(body),
            "Missing required fields"
        );
    }

    #[test]
    fn test_error_message_from_plain_body() {
        let body = "Bad Gateway".to_string();
        assert_eq!(EmailClient::error_message_from_body(body), "Bad Gateway");
    }
}
