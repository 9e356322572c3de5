//! Executor configuration (tether.toml)
//!
//! ```toml
//! fatal_policy = "abort"
//! log_submissions = false
//! ```
//!
//! Every field is optional. Environment variables override file values.

use crate::error::ConfigError;
use crate::fatal::FatalPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Overrides [`ExecutorConfig::fatal_policy`] (`abort` or `panic`)
pub const FATAL_POLICY_ENV: &str = "TETHER_FATAL_POLICY";

/// Overrides [`ExecutorConfig::log_submissions`] (`true` or `false`)
pub const LOG_SUBMISSIONS_ENV: &str = "TETHER_LOG_SUBMISSIONS";

/// Settings for an [`ExecutorRuntime`](crate::ExecutorRuntime)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// What the fatal handler does on a contract violation
    pub fatal_policy: FatalPolicy,

    /// Emit a debug event for every job submission
    pub log_submissions: bool,
}

impl ExecutorConfig {
    /// Parse a config from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ExecutorConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(FATAL_POLICY_ENV) {
            self.fatal_policy = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: FATAL_POLICY_ENV.to_string(),
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(LOG_SUBMISSIONS_ENV) {
            self.log_submissions = parse_bool(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: LOG_SUBMISSIONS_ENV.to_string(),
                value: value.clone(),
            })?;
        }

        Ok(self)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ExecutorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExecutorConfig::default());
        assert_eq!(config.fatal_policy, FatalPolicy::Abort);
        assert!(!config.log_submissions);
    }

    #[test]
    fn test_parse_config() {
        let config = ExecutorConfig::from_toml_str(
            r#"
            fatal_policy = "panic"
            log_submissions = true
            "#,
        )
        .unwrap();
        assert_eq!(config.fatal_policy, FatalPolicy::Panic);
        assert!(config.log_submissions);
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let err = ExecutorConfig::from_toml_str(r#"fatal_policy = "exit""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let config = ExecutorConfig::default()
            .with_overrides(lookup(&[(FATAL_POLICY_ENV, "panic"), (LOG_SUBMISSIONS_ENV, "on")]))
            .unwrap();
        assert_eq!(config.fatal_policy, FatalPolicy::Panic);
        assert!(config.log_submissions);
    }

    #[test]
    fn test_invalid_override() {
        let err = ExecutorConfig::default()
            .with_overrides(lookup(&[(LOG_SUBMISSIONS_ENV, "maybe")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, LOG_SUBMISSIONS_ENV);
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = ExecutorConfig::from_file(Path::new("/nonexistent/tether.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
