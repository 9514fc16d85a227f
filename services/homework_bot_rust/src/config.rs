use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use homework_rust_core::clients::practicum::DEFAULT_ENDPOINT;
use homework_rust_core::clients::telegram::DEFAULT_API_BASE_URL;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Required variables, in the order they are reported when missing
pub const REQUIRED_VARS: [&str; 3] = [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID];

pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_LOG_PATH: &str = "homework_bot.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    #[error("invalid {key}: {value:?} ({expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,

    pub endpoint: String,
    pub telegram_api_base_url: String,

    pub retry_period: Duration,
}

// Tokens stay out of logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_base_url", &self.telegram_api_base_url)
            .field("retry_period", &self.retry_period)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let practicum_token = get(PRACTICUM_TOKEN).unwrap_or_default();
        let telegram_token = get(TELEGRAM_TOKEN).unwrap_or_default();
        let telegram_chat_id = get(TELEGRAM_CHAT_ID).unwrap_or_default();

        let endpoint = get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let telegram_api_base_url =
            get("TELEGRAM_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let retry_period = match get("RETRY_PERIOD_SECS") {
            None => Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    key: "RETRY_PERIOD_SECS",
                    value: raw,
                    expected: "whole number of seconds",
                })?,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            telegram_api_base_url,
            retry_period,
        })
    }
}

/// Log file location; resolved before the rest of the config so that
/// missing-variable errors are logged too.
pub fn log_path_from_env() -> PathBuf {
    env::var("HOMEWORK_BOT_LOG_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string())
        .into()
}
