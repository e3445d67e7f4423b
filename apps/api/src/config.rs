use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::agent::retry::RetryPolicy;

/// Application configuration loaded from environment variables.
///
/// Constructed once in `main()` and passed by value into `AppState`;
/// immutable afterwards. No ambient global.
#[derive(Debug, Clone)]
pub struct Config {
    /// Valid API keys for the X-API-Key header.
    pub api_keys: Vec<String>,
    pub anthropic_api_key: String,
    pub claude_model: String,
    pub claude_max_tokens: u32,
    pub retry_max_attempts: u32,
    pub retry_delays: Vec<Duration>,
    pub retry_max_total_seconds: u64,
    /// Wall-clock SLA for one analysis request.
    pub analysis_timeout_seconds: u64,
    pub concurrent_requests_limit: usize,
    pub max_file_size_mb: usize,
    pub port: u16,
    pub rust_log: String,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_keys: parse_api_keys(&require_env("API_KEYS")?)?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            claude_model: env_or("CLAUDE_MODEL", "claude-sonnet-4-5-20250929"),
            claude_max_tokens: parse_env("CLAUDE_MAX_TOKENS", 8192)?,
            retry_max_attempts: parse_env("RETRY_MAX_ATTEMPTS", 3)?,
            retry_delays: parse_delays(&env_or("RETRY_DELAYS", "1,2,4"))?,
            retry_max_total_seconds: parse_env("RETRY_MAX_TOTAL_SECONDS", 30)?,
            analysis_timeout_seconds: parse_env("ANALYSIS_TIMEOUT_SECONDS", 30)?,
            concurrent_requests_limit: parse_env("CONCURRENT_REQUESTS_LIMIT", 10)?,
            max_file_size_mb: parse_env("MAX_FILE_SIZE_MB", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            debug: env_or("DEBUG", "false") == "true",
        })
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            delays: self.retry_delays.clone(),
            max_total: Duration::from_secs(self.retry_max_total_seconds),
        }
    }

    pub fn environment(&self) -> &'static str {
        if self.debug {
            "development"
        } else {
            "production"
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated key list. Every key must be at least 16 characters.
fn parse_api_keys(raw: &str) -> Result<Vec<String>> {
    let keys: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if keys.is_empty() {
        bail!("API_KEYS must contain at least one key");
    }
    for key in &keys {
        if key.len() < 16 {
            bail!("API key is too short (minimum 16 characters)");
        }
    }
    Ok(keys)
}

/// Comma-separated delays in seconds, e.g. "1,2,4".
fn parse_delays(raw: &str) -> Result<Vec<Duration>> {
    let delays: Vec<f64> = raw
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<f64>()
                .with_context(|| format!("invalid retry delay '{d}'"))
        })
        .collect::<Result<_>>()?;

    if delays.is_empty() {
        bail!("RETRY_DELAYS must contain at least one delay");
    }
    if delays.iter().any(|d| *d <= 0.0) {
        bail!("all retry delays must be positive");
    }
    Ok(delays.into_iter().map(Duration::from_secs_f64).collect())
}

#[cfg(test)]
impl Config {
    /// Fixture for handler and auth tests.
    pub fn for_tests() -> Self {
        Config {
            api_keys: vec!["test-key-0123456789abcdef".to_string()],
            anthropic_api_key: "sk-test".to_string(),
            claude_model: "claude-sonnet-4-5-20250929".to_string(),
            claude_max_tokens: 8192,
            retry_max_attempts: 3,
            retry_delays: vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
            retry_max_total_seconds: 30,
            analysis_timeout_seconds: 30,
            concurrent_requests_limit: 10,
            max_file_size_mb: 10,
            port: 8080,
            rust_log: "info".to_string(),
            debug: false,
        }
    }
}
