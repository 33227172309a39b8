//! Process-wide configuration resolved from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Env var holding the default credential for the generation endpoint
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const ENDPOINT_VAR: &str = "COACH_API_ENDPOINT";
pub const CONFIG_DIR_VAR: &str = "COACH_CONFIG_DIR";

#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Used when the user has not supplied their own key
    pub default_api_key: Option<String>,
    pub endpoint: String,
    pub request_timeout: Duration,
    /// Minimum spacing between outbound generation calls
    pub min_call_interval: Duration,
    /// Overrides the platform config directory for preferences
    pub config_dir: Option<PathBuf>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            default_api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
            min_call_interval: Duration::from_millis(1000),
            config_dir: None,
        }
    }
}

impl CoachConfig {
    pub fn from_env() -> Self {
        let non_empty = |var: &str| env::var(var).ok().filter(|v| !v.trim().is_empty());

        Self {
            default_api_key: non_empty(API_KEY_VAR),
            endpoint: non_empty(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            config_dir: non_empty(CONFIG_DIR_VAR).map(PathBuf::from),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoachConfig::default();
        assert!(config.default_api_key.is_none());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.min_call_interval, Duration::from_millis(1000));
    }
}
