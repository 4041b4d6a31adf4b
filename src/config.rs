//! Configuration management for the visitor notification pipeline.
//!
//! This module handles loading and validating configuration from environment
//! variables, with an optional `.env` file loaded first.

use crate::company::CompanyConfig;
use crate::delivery::RetryPolicy;
use crate::error::{ConfigError, ConfigResult};
use crate::network::{NetworkInfo, TimeoutPolicy};
use std::env;
use std::time::Duration;

/// Default base URL of the delivery endpoint.
pub const DEFAULT_EMAIL_API_BASE_URL: &str = "http://localhost:5000";

/// Configuration for the visitor notification pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the delivery endpoint (without `/api/...`)
    pub email_api_url: String,

    /// Extra attempts after the first failed one (default: 2)
    pub max_retries: u32,

    /// Base retry delay in milliseconds (default: 1000)
    pub retry_delay_ms: u64,

    /// Transport connect timeout in seconds (default: 10)
    pub connect_timeout: u64,

    /// Overall per-request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Submission timeout on a normal connection, in seconds (default: 30)
    pub submit_timeout_secs: u64,

    /// Submission timeout on a slow connection, in seconds (default: 60)
    pub slow_submit_timeout_secs: u64,

    /// Connection quality hints
    pub network: NetworkInfo,

    /// Optional JSON file with branding and hosts
    pub company_config_path: Option<String>,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `EMAIL_API_BASE_URL`: Base URL of the delivery endpoint
    /// - `EMAIL_MAX_RETRIES`: Retries after the first attempt (default: 2)
    /// - `EMAIL_RETRY_DELAY_MS`: Base retry delay (default: 1000)
    /// - `CONNECT_TIMEOUT`: Connect timeout in seconds (default: 10)
    /// - `REQUEST_TIMEOUT`: Overall per-request timeout in seconds (default: 30)
    /// - `SUBMIT_TIMEOUT_SECS`: Submission timeout (default: 30)
    /// - `SLOW_SUBMIT_TIMEOUT_SECS`: Submission timeout on slow links (default: 60)
    /// - `NETWORK_EFFECTIVE_TYPE`: e.g. `4g`, `2g`, `slow-2g`
    /// - `NETWORK_DOWNLINK_MBPS`: Estimated downlink bandwidth
    /// - `COMPANY_CONFIG_PATH`: JSON file with branding and hosts
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let email_api_url = env::var("EMAIL_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_EMAIL_API_BASE_URL.to_string());

        if !email_api_url.starts_with("http://") && !email_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "EMAIL_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let max_retries = Self::parse_env_u32("EMAIL_MAX_RETRIES", 2)?;
        let retry_delay_ms = Self::parse_env_u64("EMAIL_RETRY_DELAY_MS", 1000)?;
        let connect_timeout = Self::parse_env_u64("CONNECT_TIMEOUT", 10)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        let submit_timeout_secs = Self::parse_env_u64("SUBMIT_TIMEOUT_SECS", 30)?;
        let slow_submit_timeout_secs = Self::parse_env_u64("SLOW_SUBMIT_TIMEOUT_SECS", 60)?;

        if submit_timeout_secs == 0 || slow_submit_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SUBMIT_TIMEOUT_SECS".to_string(),
                reason: "Timeouts must be greater than zero".to_string(),
            });
        }

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Timeouts must be greater than zero".to_string(),
            });
        }

        let network = NetworkInfo {
            online: true,
            effective_type: env::var("NETWORK_EFFECTIVE_TYPE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            downlink_mbps: Self::parse_env_f64_opt("NETWORK_DOWNLINK_MBPS")?,
        };

        let company_config_path = env::var("COMPANY_CONFIG_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            email_api_url,
            max_retries,
            retry_delay_ms,
            connect_timeout,
            request_timeout,
            submit_timeout_secs,
            slow_submit_timeout_secs,
            network,
            company_config_path,
            log_level,
        })
    }

    /// Retry policy for the delivery client.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Submission timeouts for fast and slow connections.
    pub fn timeout_policy(&self) -> TimeoutPolicy {
        TimeoutPolicy {
            fast: Duration::from_secs(self.submit_timeout_secs),
            slow: Duration::from_secs(self.slow_submit_timeout_secs),
        }
    }

    /// Company configuration from `COMPANY_CONFIG_PATH`, or the built-in one.
    pub fn load_company(&self) -> ConfigResult<CompanyConfig> {
        match &self.company_config_path {
            Some(path) => CompanyConfig::from_json_file(path),
            None => Ok(CompanyConfig::default()),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_env_f64_opt(var_name: &str) -> ConfigResult<Option<f64>> {
        match env::var(var_name) {
            Ok(val) => match val.parse::<f64>() {
                Ok(v) if v >= 0.0 => Ok(Some(v)),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be a non-negative number, got: {}", val),
                }),
            },
            Err(_) => Ok(None),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            email_api_url: DEFAULT_EMAIL_API_BASE_URL.to_string(),
            max_retries: 2,
            retry_delay_ms: 1000,
            connect_timeout: 10,
            request_timeout: 30,
            submit_timeout_secs: 30,
            slow_submit_timeout_secs: 60,
            network: NetworkInfo::online(),
            company_config_path: None,
            log_level: "info".to_string(),
        }
    }
}
