use std::str::FromStr;
use std::time::Duration;

use staydesk_core::user::DEFAULT_PASSWORD_MIN_LENGTH;
use staydesk_provider::RetryPolicy;

/// A configuration variable was set to something we cannot parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against a
/// backend on `localhost:3001`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the hotel backend (default: `http://localhost:3001`).
    pub api_base: String,
    /// SQLite URL of the local store (default: `sqlite://staydesk.db?mode=rwc`).
    pub database_url: String,
    /// Per-request timeout for backend calls in seconds (default: `10`).
    pub request_timeout_secs: u64,
    /// Attempts per catalog read, including the first (default: `3`).
    pub retry_max_attempts: u32,
    pub retry_initial_delay_ms: u64,
    pub retry_max_delay_ms: u64,
    /// Minimum password length for sign-up and password change (default: `6`).
    pub password_min_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:3001".into(),
            database_url: "sqlite://staydesk.db?mode=rwc".into(),
            request_timeout_secs: 10,
            retry_max_attempts: 3,
            retry_initial_delay_ms: 250,
            retry_max_delay_ms: 2000,
            password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default                         |
    /// |--------------------------|---------------------------------|
    /// | `STAYDESK_API_BASE`      | `http://localhost:3001`         |
    /// | `DATABASE_URL`           | `sqlite://staydesk.db?mode=rwc` |
    /// | `REQUEST_TIMEOUT_SECS`   | `10`                            |
    /// | `RETRY_MAX_ATTEMPTS`     | `3`                             |
    /// | `RETRY_INITIAL_DELAY_MS` | `250`                           |
    /// | `RETRY_MAX_DELAY_MS`     | `2000`                          |
    /// | `PASSWORD_MIN_LENGTH`    | `6`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base = lookup("STAYDESK_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.database_url);

        Ok(Self {
            api_base,
            database_url,
            request_timeout_secs: parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                "a positive number of seconds",
                defaults.request_timeout_secs,
            )?,
            retry_max_attempts: parse_var(
                &lookup,
                "RETRY_MAX_ATTEMPTS",
                "a positive integer",
                defaults.retry_max_attempts,
            )?,
            retry_initial_delay_ms: parse_var(
                &lookup,
                "RETRY_INITIAL_DELAY_MS",
                "a number of milliseconds",
                defaults.retry_initial_delay_ms,
            )?,
            retry_max_delay_ms: parse_var(
                &lookup,
                "RETRY_MAX_DELAY_MS",
                "a number of milliseconds",
                defaults.retry_max_delay_ms,
            )?,
            password_min_length: parse_var(
                &lookup,
                "PASSWORD_MIN_LENGTH",
                "a positive integer",
                defaults.password_min_length,
            )?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry policy for catalog reads built from the `RETRY_*` variables.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            initial_delay: Duration::from_millis(self.retry_initial_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
            ..RetryPolicy::default()
        }
    }
}

/// Parse `name` when set; zero is rejected for every numeric setting.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(ConfigError::Invalid {
            name,
            expected,
            value: raw,
        }),
    }
}
