//! Client configuration.
//!
//! Defaults suit a local development server. [`AuraConfig::from_env`]
//! overrides them from the environment:
//!
//! | Variable                    | Meaning                                   |
//! |-----------------------------|-------------------------------------------|
//! | `AURA_API_BASE_URL`         | API root, e.g. `https://aura.example`     |
//! | `AURA_REQUEST_TIMEOUT_SECS` | Per-request timeout in whole seconds (>0) |
//! | `AURA_RETRY_ATTEMPTS`       | Attempts for bootstrap and result checks  |

use std::time::Duration;

use aura_session::RouteTable;
use aura_transport::RetryPolicy;
use url::Url;

use crate::AuraError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

const ENV_BASE_URL: &str = "AURA_API_BASE_URL";
const ENV_TIMEOUT: &str = "AURA_REQUEST_TIMEOUT_SECS";
const ENV_RETRY: &str = "AURA_RETRY_ATTEMPTS";

#[derive(Debug, Clone)]
pub struct AuraConfig {
    /// Validated when the app is built.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Silent refresh at start-up.
    pub bootstrap_retry: RetryPolicy,
    /// Prediction reconciliation.
    pub check_retry: RetryPolicy,
    pub routes: RouteTable,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            bootstrap_retry: RetryPolicy {
                max_attempts: 2,
                backoff: Duration::from_millis(250),
            },
            check_retry: RetryPolicy {
                max_attempts: 2,
                backoff: Duration::from_millis(500),
            },
            routes: RouteTable::default(),
        }
    }
}

impl AuraConfig {
    /// Defaults overridden by `AURA_*` environment variables.
    ///
    /// # Errors
    /// [`AuraError::Config`] naming the variable that failed to parse.
    pub fn from_env() -> Result<Self, AuraError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AuraError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.with_api_base_url(url);
            config.base_url()?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| invalid(ENV_TIMEOUT, &raw, "expected a positive integer"))?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = lookup(ENV_RETRY) {
            let attempts = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid(ENV_RETRY, &raw, "expected a positive integer"))?;
            config = config.with_retry_attempts(attempts);
        }

        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the attempt count for both retried operations, keeping their
    /// backoffs.
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.bootstrap_retry.max_attempts = attempts;
        self.check_retry.max_attempts = attempts;
        self
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Parses [`api_base_url`](Self::api_base_url).
    ///
    /// # Errors
    /// [`AuraError::Config`] unless it is an absolute `http`/`https` URL.
    pub fn base_url(&self) -> Result<Url, AuraError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| invalid(ENV_BASE_URL, &self.api_base_url, &e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(
                ENV_BASE_URL,
                &self.api_base_url,
                &format!("unsupported scheme {other:?}"),
            )),
        }
    }
}

fn invalid(name: &str, value: &str, why: &str) -> AuraError {
    AuraError::Config(format!("{name}={value:?}: {why}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AuraConfig, AuraError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuraConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_points_at_local_server() {
        let config = AuraConfig::default();
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8000/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.bootstrap_retry.max_attempts, 2);
        assert_eq!(config.check_retry.backoff, Duration::from_millis(500));
    }

    #[test]
    fn test_from_lookup_without_vars_is_default() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_from_lookup_applies_overrides() {
        let config = from_pairs(&[
            ("AURA_API_BASE_URL", "https://aura.example"),
            ("AURA_REQUEST_TIMEOUT_SECS", "3"),
            ("AURA_RETRY_ATTEMPTS", "4"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://aura.example");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.bootstrap_retry.max_attempts, 4);
        assert_eq!(config.check_retry.max_attempts, 4);
        assert_eq!(config.bootstrap_retry.backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(from_pairs(&[("AURA_API_BASE_URL", "not a url")]).is_err());
        assert!(from_pairs(&[("AURA_API_BASE_URL", "ftp://x")]).is_err());
        assert!(from_pairs(&[("AURA_REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(from_pairs(&[("AURA_REQUEST_TIMEOUT_SECS", "soon")]).is_err());

        let err = from_pairs(&[("AURA_RETRY_ATTEMPTS", "-1")]).unwrap_err();
        assert!(err.to_string().contains("AURA_RETRY_ATTEMPTS"));
    }
}
