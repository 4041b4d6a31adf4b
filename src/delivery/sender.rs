//! Single-message delivery with retry and cancellation.

use super::outcome::DeliveryOutcome;
use super::retry::RetryPolicy;
use crate::client::AsyncEmailClient;
use crate::error::DeliveryError;
use crate::metrics::Metrics;
use crate::models::EmailMessage;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Sends one message through an [`AsyncEmailClient`], retrying failures
/// according to a [`RetryPolicy`].
///
/// There is no timeout of its own. Callers bound the time spent by
/// cancelling the token they pass to [`DeliveryClient::send`]; both the
/// request and the back-off delay race against it.
#[derive(Clone)]
pub struct DeliveryClient {
    client: Arc<dyn AsyncEmailClient>,
    policy: RetryPolicy,
    metrics: Metrics,
}

impl DeliveryClient {
    pub fn new(client: Arc<dyn AsyncEmailClient>, policy: RetryPolicy) -> Self {
        Self {
            client,
            policy,
            metrics: Metrics::new(),
        }
    }

    /// Share a metrics collector with other components.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Deliver `message`, retrying until it is accepted, the retry budget
    /// runs out, or `cancel` fires.
    pub async fn send(&self, message: &EmailMessage, cancel: &CancellationToken) -> DeliveryOutcome {
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return self.cancelled(message, attempt);
            }
            attempt += 1;

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(DeliveryError::Cancelled),
                res = self.client.send_email(message) => res,
            };

            let error = match result {
                Ok(receipt) => {
                    self.metrics.record_email_delivered();
                    tracing::info!(
                        to = %message.to,
                        attempt,
                        message_id = receipt.message_id.as_deref().unwrap_or("-"),
                        "Email delivered"
                    );
                    return DeliveryOutcome::Delivered {
                        message_id: receipt.message_id,
                        attempts: attempt,
                    };
                }
                Err(DeliveryError::Cancelled) => return self.cancelled(message, attempt),
                Err(error) => error,
            };

            let delay = match self.policy.delay_after(attempt) {
                Some(delay) if error.is_retriable() => delay,
                _ => {
                    self.metrics.record_email_failed();
                    tracing::warn!(
                        to = %message.to,
                        attempts = attempt,
                        error = %error,
                        "Email delivery failed, giving up"
                    );
                    return DeliveryOutcome::Failed {
                        error,
                        attempts: attempt,
                    };
                }
            };

            tracing::warn!(
                to = %message.to,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Email delivery failed, retrying"
            );
            self.metrics.record_retry();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.cancelled(message, attempt),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    fn cancelled(&self, message: &EmailMessage, attempts: u32) -> DeliveryOutcome {
        self.metrics.record_cancellation();
        tracing::info!(to = %message.to, attempts, "Email delivery cancelled");
        DeliveryOutcome::Cancelled { attempts }
    }
}
