//! Per-message delivery result.

use crate::error::DeliveryError;

/// How one message fared after all its attempts.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The endpoint accepted the message.
    Delivered {
        message_id: Option<String>,
        attempts: u32,
    },

    /// Every attempt failed; `error` is the last failure.
    Failed { error: DeliveryError, attempts: u32 },

    /// The cancellation token fired before the message was accepted.
    Cancelled { attempts: u32 },
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DeliveryOutcome::Cancelled { .. })
    }

    pub fn message_id(&self) -> Option<&str> {
        match self {
            DeliveryOutcome::Delivered { message_id, .. } => message_id.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DeliveryError> {
        match self {
            DeliveryOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Number of requests started for this message.
    pub fn attempts(&self) -> u32 {
        match self {
            DeliveryOutcome::Delivered { attempts, .. }
            | DeliveryOutcome::Failed { attempts, .. }
            | DeliveryOutcome::Cancelled { attempts } => *attempts,
        }
    }

    /// Convert into a `Result`, turning cancellation into `DeliveryError::Cancelled`.
    pub fn into_result(self) -> Result<Option<String>, DeliveryError> {
        match self {
            DeliveryOutcome::Delivered { message_id, .. } => Ok(message_id),
            DeliveryOutcome::Failed { error, .. } => Err(error),
            DeliveryOutcome::Cancelled { .. } => Err(DeliveryError::Cancelled),
        }
    }
}
