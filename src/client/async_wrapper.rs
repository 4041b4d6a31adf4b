//! Async wrapper around the synchronous EmailClient.
//!
//! This module provides an async interface to the synchronous EmailClient by
//! using `tokio::task::spawn_blocking` to run HTTP operations on a dedicated
//! thread pool, preventing blocking of the async runtime.

use crate::client::EmailClient;
use crate::error::{DeliveryError, DeliveryResult};
use crate::models::{EmailMessage, HealthStatus, SendReceipt};
use async_trait::async_trait;
use std::sync::Arc;

/// Async trait for delivery endpoint operations.
///
/// One call is one HTTP request. Implementations must not retry.
#[async_trait]
pub trait AsyncEmailClient: Send + Sync {
    /// Post one message to the send endpoint.
    async fn send_email(&self, message: &EmailMessage) -> DeliveryResult<SendReceipt>;

    /// Query the health endpoint.
    async fn health(&self) -> DeliveryResult<HealthStatus>;
}

/// Async wrapper around the synchronous EmailClient.
#[derive(Clone)]
pub struct AsyncEmailClientImpl {
    client: Arc<EmailClient>,
}

impl AsyncEmailClientImpl {
    pub fn new(client: EmailClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncEmailClient for AsyncEmailClientImpl {
    async fn send_email(&self, message: &EmailMessage) -> DeliveryResult<SendReceipt> {
        let client = self.client.clone();
        let message = message.clone();

        tokio::task::spawn_blocking(move || client.send_email(&message))
            .await
            .map_err(|e| DeliveryError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn health(&self) -> DeliveryResult<HealthStatus> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.health())
            .await
            .map_err(|e| DeliveryError::HttpError(format!("Task join error: {}", e)))?
    }
}
