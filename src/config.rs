//! Configuration for the remote insight service

use crate::error::ConfigError;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct InsightConfig {
    /// Absent until the caller configures one; checked before any request
    pub api_key: Option<SecretString>,
    pub endpoint: String,
    pub model: String,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl InsightConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read configuration values through `get`, so tests never touch the
    /// process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = get("BALANCE_INSIGHTS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into()));
        let endpoint = get("BALANCE_INSIGHTS_ENDPOINT").unwrap_or(defaults.endpoint);
        let model = get("BALANCE_INSIGHTS_MODEL").unwrap_or(defaults.model);
        let max_tokens = match get("BALANCE_INSIGHTS_MAX_TOKENS") {
            Some(raw) => parse_number("BALANCE_INSIGHTS_MAX_TOKENS", &raw)?,
            None => defaults.max_tokens,
        };
        let timeout = match get("BALANCE_INSIGHTS_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("BALANCE_INSIGHTS_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };

        Ok(Self {
            api_key,
            endpoint,
            model,
            api_version: defaults.api_version,
            max_tokens,
            timeout,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when a non-blank credential is configured
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults_without_credential() {
        let cfg = InsightConfig::from_env_with(|_| None).expect("cfg");
        assert!(!cfg.has_credential());
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.max_tokens, 1000);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "BALANCE_INSIGHTS_API_KEY" => Some("sekrit".into()),
            "BALANCE_INSIGHTS_ENDPOINT" => Some("http://localhost/v1/messages".into()),
            "BALANCE_INSIGHTS_MAX_TOKENS" => Some("512".into()),
            "BALANCE_INSIGHTS_TIMEOUT_SECS" => Some("5".into()),
            _ => None,
        };
        let cfg = InsightConfig::from_env_with(get).expect("cfg");
        assert!(cfg.has_credential());
        assert_eq!(cfg.endpoint, "http://localhost/v1/messages");
        assert_eq!(cfg.max_tokens, 512);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn from_env_blank_key_is_missing() {
        let get = |k: &str| match k {
            "BALANCE_INSIGHTS_API_KEY" => Some("   ".into()),
            _ => None,
        };
        let cfg = InsightConfig::from_env_with(get).expect("cfg");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn from_env_rejects_bad_number() {
        let get = |k: &str| match k {
            "BALANCE_INSIGHTS_MAX_TOKENS" => Some("lots".into()),
            _ => None,
        };
        let res = InsightConfig::from_env_with(get);
        assert!(res.is_err());
    }

    #[test]
    fn debug_output_redacts_key() {
        let cfg = InsightConfig::default().with_api_key("sekrit");
        assert!(!format!("{:?}", cfg).contains("sekrit"));
    }
}
