//! Visitor Notify - validation and email notification for visitor registrations.
//!
//! This library takes a visitor registration form, validates it, resolves the
//! selected host and sends two emails through an HTTP mail-relay endpoint: a
//! confirmation to the visitor and a notification to the host. Delivery is
//! retried with a linear back-off and bounded by a cancellable timeout.
//!
//! # Architecture
//!
//! - **domain**: Form data, field validation, phone and email value objects
//! - **company**: Branding and the host directory
//! - **templates**: Visitor confirmation and host notification emails
//! - **client**: HTTP client for the delivery endpoint
//! - **delivery**: Retrying single sends and concurrent batches
//! - **submission**: The orchestrator driving one registration
//! - **network**: Connection quality hints and submission timeouts
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **metrics**: Request and delivery counters

pub mod client;
pub mod company;
pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod network;
pub mod submission;
pub mod templates;

// Re-export commonly used types
pub use client::{AsyncEmailClient, AsyncEmailClientImpl, EmailClient};
pub use company::{CompanyConfig, Host, HostDirectory};
pub use config::Config;
pub use delivery::{BatchDispatcher, DeliveryClient, DeliveryOutcome, RetryPolicy};
pub use domain::{validate_form, FormErrors, FormField, ValidationError, VisitorFormData};
pub use error::{ConfigError, DeliveryError, SubmissionError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{EmailMessage, HealthStatus, SendReceipt};
pub use network::{NetworkInfo, TimeoutPolicy};
pub use submission::{SubmissionOrchestrator, SubmissionReport, SubmissionState};
pub use templates::{host_notification, visitor_confirmation, Clock, FixedClock, SystemClock};
