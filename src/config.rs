//! Centralized configuration management for trainify

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the signed-in session
    pub session_path: PathBuf,
    /// Log file written by the TUI and CLI
    pub log_file: String,
    /// Rows per table page
    pub page_size: usize,
    /// Delay added to every mock repository call (milliseconds)
    pub mock_latency_ms: u64,
    /// Input poll interval of the TUI loop (milliseconds)
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_path: PathBuf::from("./trainify_session.json"),
            log_file: "trainify.log".to_string(),
            page_size: 10,
            mock_latency_ms: 300,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let session_path = std::env::var("TRAINIFY_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_path);

        let log_file = std::env::var("TRAINIFY_LOG_FILE").unwrap_or(defaults.log_file);

        Ok(Config {
            session_path,
            log_file,
            page_size: parse_env_var("TRAINIFY_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            mock_latency_ms: parse_env_var("TRAINIFY_MOCK_LATENCY_MS")?
                .unwrap_or(defaults.mock_latency_ms),
            tick_rate_ms: parse_env_var("TRAINIFY_TICK_RATE_MS")?.unwrap_or(defaults.tick_rate_ms),
        })
    }

    /// Get mock repository latency as Duration
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    /// Get TUI tick rate as Duration
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(anyhow::anyhow!("TRAINIFY_PAGE_SIZE must be greater than zero"));
        }

        if self.tick_rate_ms == 0 {
            return Err(anyhow::anyhow!("TRAINIFY_TICK_RATE_MS must be greater than zero"));
        }

        if let Some(parent) = self.session_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Session directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.session_path, PathBuf::from("./trainify_session.json"));
        assert_eq!(config.log_file, "trainify.log");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.mock_latency(), Duration::from_millis(300));
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        config.validate().unwrap();

        let zero_page = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(zero_page.validate().is_err());

        let missing_dir = Config {
            session_path: PathBuf::from("/definitely/not/here/session.json"),
            ..Config::default()
        };
        assert!(missing_dir.validate().is_err());
    }

    #[test]
    fn test_parse_env_var() {
        std::env::set_var("TRAINIFY_TEST_PARSE_OK", "42");
        std::env::set_var("TRAINIFY_TEST_PARSE_BAD", "forty-two");

        let ok: Option<usize> = parse_env_var("TRAINIFY_TEST_PARSE_OK").unwrap();
        assert_eq!(ok, Some(42));
        assert!(parse_env_var::<usize>("TRAINIFY_TEST_PARSE_BAD").is_err());
        assert_eq!(parse_env_var::<usize>("TRAINIFY_TEST_PARSE_UNSET").unwrap(), None);
    }
}
