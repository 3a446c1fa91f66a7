use std::env;

use thiserror::Error;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{name} is not a valid number: `{value}`")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub core_url: String,
    pub api_id: Option<String>,
    pub profile_id: Option<String>,
    pub access_token: Option<String>,
    pub request_timeout_seconds: u64,
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();

        let core_url = env::var("ZAPI_CORE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("ZAPI_CORE_URL"))?;

        let request_timeout_seconds = match env::var("ZAPI_REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: "ZAPI_REQUEST_TIMEOUT_SECONDS",
                value: raw,
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            core_url,
            api_id: non_empty_var("ZAPI_API_ID"),
            profile_id: non_empty_var("ZAPI_PROFILE_ID"),
            access_token: non_empty_var("ZAPI_ACCESS_TOKEN"),
            request_timeout_seconds,
        })
    }

    /// Create a configuration with explicit values
    pub fn new(
        core_url: impl Into<String>,
        api_id: Option<String>,
        request_timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            core_url: core_url.into(),
            api_id,
            profile_id: None,
            access_token: None,
            request_timeout_seconds: request_timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
