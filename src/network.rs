//! Network quality hints and the submission timeout they select.

use std::time::Duration;

/// What is known about the current connection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetworkInfo {
    pub online: bool,

    /// Effective connection type, e.g. `4g`, `3g`, `2g`, `slow-2g`
    pub effective_type: Option<String>,

    /// Estimated downlink bandwidth in Mbps
    pub downlink_mbps: Option<f64>,
}

impl NetworkInfo {
    /// An online connection with no quality hints.
    pub fn online() -> Self {
        Self {
            online: true,
            ..Default::default()
        }
    }

    /// Whether the connection should be treated as slow.
    pub fn is_slow(&self) -> bool {
        let slow_type = matches!(self.effective_type.as_deref(), Some("slow-2g") | Some("2g"));
        let slow_downlink = self.downlink_mbps.is_some_and(|d| d < 1.0);
        slow_type || slow_downlink
    }
}

/// Timeouts armed around a submission, chosen by connection quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub fast: Duration,
    pub slow: Duration,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            fast: Duration::from_secs(30),
            slow: Duration::from_secs(60),
        }
    }
}

impl TimeoutPolicy {
    pub fn timeout_for(&self, network: &NetworkInfo) -> Duration {
        if network.is_slow() {
            self.slow
        } else {
            self.fast
        }
    }
}
