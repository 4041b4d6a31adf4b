//! Concurrent delivery of several messages.

use super::outcome::DeliveryOutcome;
use super::sender::DeliveryClient;
use crate::models::EmailMessage;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

/// Fans a batch of messages out through one [`DeliveryClient`].
#[derive(Clone)]
pub struct BatchDispatcher {
    delivery: DeliveryClient,
}

impl BatchDispatcher {
    pub fn new(delivery: DeliveryClient) -> Self {
        Self { delivery }
    }

    pub fn delivery(&self) -> &DeliveryClient {
        &self.delivery
    }

    /// Send every message concurrently and wait for all of them to settle.
    ///
    /// Returns one outcome per message, in input order. A failing message
    /// neither cancels nor delays the others; only `cancel` stops the batch.
    pub async fn send_all(
        &self,
        messages: &[EmailMessage],
        cancel: &CancellationToken,
    ) -> Vec<DeliveryOutcome> {
        tracing::debug!(count = messages.len(), "Dispatching email batch");

        let sends = messages
            .iter()
            .map(|message| self.delivery.send(message, cancel));
        let outcomes = join_all(sends).await;

        let delivered = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::debug!(
            delivered,
            failed = outcomes.len() - delivered,
            "Email batch settled"
        );

        outcomes
    }
}
