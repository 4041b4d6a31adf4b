//! Wire types exchanged with the delivery endpoint.

pub mod email;
pub mod health;

pub use email::{EmailMessage, SendEmailResponse, SendReceipt};
pub use health::HealthStatus;
