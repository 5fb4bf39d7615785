//! Blocking HTTP client for a remote optimizer service.
//!
//! Speaks the same JSON contract as [`crate::solver::optimize`] and retries
//! transient failures (timeouts, network errors, HTTP 5xx and 429) after a
//! fixed delay schedule.

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::model::{HealthStatus, OptimizeRequest, OptimizeResponse};
use crate::validation::{validate_request, ValidationError};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_DELAYS_MS: [u64; 3] = [1_000, 2_000, 4_000];

const ENV_SERVICE_URL: &str = "OPTIMIZER_SERVICE_URL";
const ENV_TIMEOUT_SECS: &str = "OPTIMIZER_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub base_url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Delay before each retry; its length is the retry budget.
    pub retry_delays_ms: Vec<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            endpoint: "/optimize".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_delays_ms: DEFAULT_RETRY_DELAYS_MS.to_vec(),
        }
    }
}

impl OptimizerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `OPTIMIZER_SERVICE_URL` (required) and `OPTIMIZER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_SERVICE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::Config(format!("{} must be set", ENV_SERVICE_URL)))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "{} must be a valid URL, got {:?}",
                ENV_SERVICE_URL, base_url
            )));
        }

        let mut config = Self::new(base_url);
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{} must be a whole number, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        Ok(config)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("optimizer request timed out (attempt {attempt})")]
    Timeout { attempt: u32 },

    #[error("optimizer network request failed (attempt {attempt}): {message}")]
    Network { attempt: u32, message: String },

    #[error("optimizer service returned HTTP {status} (attempt {attempt})")]
    Http4xx { status: u16, attempt: u32 },

    #[error("optimizer service returned HTTP {status} (attempt {attempt})")]
    Http5xx { status: u16, attempt: u32 },

    #[error("optimizer response did not match the contract: {0}")]
    Decode(String),

    #[error("invalid optimize request: {0}")]
    Validation(#[from] ValidationError),

    #[error("optimizer client configuration: {0}")]
    Config(String),
}

impl ClientError {
    fn from_status(status: u16, attempt: u32) -> Self {
        if status >= 500 {
            ClientError::Http5xx { status, attempt }
        } else {
            ClientError::Http4xx { status, attempt }
        }
    }

    fn from_transport(err: reqwest::Error, attempt: u32) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { attempt }
        } else {
            ClientError::Network {
                attempt,
                message: err.to_string(),
            }
        }
    }

    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout { .. } | ClientError::Network { .. } => true,
            ClientError::Http4xx { status, .. } | ClientError::Http5xx { status, .. } => {
                is_retryable_status(*status)
            }
            ClientError::Decode(_) | ClientError::Validation(_) | ClientError::Config(_) => false,
        }
    }

    /// 1-based attempt that produced the error, if a request was sent.
    pub fn attempt(&self) -> Option<u32> {
        match self {
            ClientError::Timeout { attempt }
            | ClientError::Network { attempt, .. }
            | ClientError::Http4xx { attempt, .. }
            | ClientError::Http5xx { attempt, .. } => Some(*attempt),
            _ => None,
        }
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    status >= 500 || status == 429
}

#[derive(Debug, Clone)]
pub struct OptimizerClient {
    config: OptimizerConfig,
    client: reqwest::blocking::Client,
}

impl OptimizerClient {
    pub fn new(config: OptimizerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Validate locally, then POST to the optimize endpoint with retries.
    pub fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, ClientError> {
        validate_request(request)?;

        let url = self.config.url(&self.config.endpoint);
        let mut attempt: u32 = 1;

        loop {
            let err = match self.send(&url, request, attempt) {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };

            let delay = self.config.retry_delays_ms.get(attempt as usize - 1);
            match delay {
                Some(&delay_ms) if err.is_retryable() => {
                    warn!(%url, attempt, delay_ms, error = %err, "optimizer request failed, retrying");
                    thread::sleep(Duration::from_millis(delay_ms));
                    attempt += 1;
                }
                _ => return Err(err),
            }
        }
    }

    fn send(
        &self,
        url: &str,
        request: &OptimizeRequest,
        attempt: u32,
    ) -> Result<OptimizeResponse, ClientError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .map_err(|err| ClientError::from_transport(err, attempt))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::from_status(status.as_u16(), attempt));
        }

        response
            .json::<OptimizeResponse>()
            .map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Single GET against the liveness endpoint; no retries.
    pub fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(self.config.url("/health"))
            .send()
            .map_err(|err| ClientError::from_transport(err, 1))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::from_status(status.as_u16(), 1));
        }

        response
            .json::<HealthStatus>()
            .map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_url_joins_slashes() {
        let config = OptimizerConfig::new("http://optimizer:8000/");
        assert_eq!(config.url("/optimize"), "http://optimizer:8000/optimize");
        assert_eq!(config.url("health"), "http://optimizer:8000/health");
    }

    #[test]
    fn test_config_from_vars() {
        let config = OptimizerConfig::from_vars(vars(&[
            ("OPTIMIZER_SERVICE_URL", "https://opt.example.com"),
            ("OPTIMIZER_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://opt.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.endpoint, "/optimize");
        assert_eq!(config.retry_delays_ms, vec![1_000, 2_000, 4_000]);
    }

    #[test]
    fn test_config_requires_url() {
        assert!(matches!(OptimizerConfig::from_vars(vars(&[])), Err(ClientError::Config(_))));
        assert!(matches!(
            OptimizerConfig::from_vars(vars(&[("OPTIMIZER_SERVICE_URL", "not a url")])),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            OptimizerConfig::from_vars(vars(&[
                ("OPTIMIZER_SERVICE_URL", "http://localhost:8000"),
                ("OPTIMIZER_TIMEOUT_SECS", "soon"),
            ])),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(ClientError::from_status(503, 2), ClientError::Http5xx { status: 503, attempt: 2 }));
        assert!(matches!(ClientError::from_status(404, 1), ClientError::Http4xx { status: 404, .. }));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::from_status(500, 1).is_retryable());
        assert!(ClientError::from_status(429, 1).is_retryable());
        assert!(!ClientError::from_status(400, 1).is_retryable());
        assert!(ClientError::Timeout { attempt: 1 }.is_retryable());
        assert!(!ClientError::Decode("bad".to_string()).is_retryable());
        assert!(!ClientError::Validation(ValidationError::DestinationCount(0)).is_retryable());
    }

    #[test]
    fn test_attempt_reported() {
        assert_eq!(ClientError::Timeout { attempt: 3 }.attempt(), Some(3));
        assert_eq!(ClientError::Decode(String::new()).attempt(), None);
    }
}
