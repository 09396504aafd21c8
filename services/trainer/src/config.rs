//! Service configuration, loaded from environment variables once at
//! startup and passed through the rest of the binary.

use std::env;
use tracing::Level;

/// How long the simulated provider waits before posting `init`.
pub const SIMULATED_INIT_DELAY_MS: u64 = 1500;

/// Holds all configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub log_level: Level,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    // *   `AVATAR_API_KEY`: The credential handed through to the avatar provider. Required.
    // *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file. Useful for local development, ignored if not present.
        dotenvy::dotenv().ok();

        let api_key = env::var("AVATAR_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingVar("AVATAR_API_KEY must be set".to_string()))?;

        let log_level_str = env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        Ok(Self { api_key, log_level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; every test that touches
    // them goes through this helper, which serializes access and restores
    // the previous values afterwards.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect();
        for (key, value) in vars {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
        let result = f();
        for (key, value) in saved {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
        result
    }

    #[test]
    fn empty_api_key_is_missing() {
        let result = with_env(&[("AVATAR_API_KEY", Some(""))], Config::from_env);
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn present_key_loads_with_the_default_log_level() {
        let config = with_env(
            &[("AVATAR_API_KEY", Some("demo-key")), ("RUST_LOG", None)],
            Config::from_env,
        )
        .unwrap();
        assert_eq!(config.api_key, "demo-key");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn garbage_log_level_is_rejected() {
        let result = with_env(
            &[
                ("AVATAR_API_KEY", Some("demo-key")),
                ("RUST_LOG", Some("chatty")),
            ],
            Config::from_env,
        );
        assert!(matches!(result, Err(ConfigError::InvalidLogLevel(_))));
    }
}
