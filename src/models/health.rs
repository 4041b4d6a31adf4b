//! Health endpoint response.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub success: bool,
    pub message: String,

    /// ISO-8601 timestamp reported by the endpoint
    pub timestamp: String,
}
