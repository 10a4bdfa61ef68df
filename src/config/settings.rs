//! Credentials and relay settings.

use std::time::Duration;

use super::{
    DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_TIME_SECS, ENV_CHAT_ID,
    ENV_PRACTICUM_TOKEN, ENV_TELEGRAM_TOKEN,
};

/// Pre-issued tokens and the chat to notify.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth token for the review API.
    pub practicum_token: String,

    /// Telegram bot token.
    pub telegram_token: String,

    /// Destination chat id.
    pub chat_id: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    #[must_use]
    pub const fn new(practicum_token: String, telegram_token: String, chat_id: String) -> Self {
        Self {
            practicum_token,
            telegram_token,
            chat_id,
        }
    }

    /// Loads credentials from the process environment.
    ///
    /// Expects `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVars`] naming every variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads credentials through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVars`] naming every variable that is
    /// missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            let value = lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let practicum_token = require(ENV_PRACTICUM_TOKEN);
        let telegram_token = require(ENV_TELEGRAM_TOKEN);
        let chat_id = require(ENV_CHAT_ID);

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvVars(missing));
        }

        Ok(Self::new(practicum_token, telegram_token, chat_id))
    }
}

// Tokens never reach the logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Tunables for the polling loop and its HTTP calls.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Review API endpoint.
    pub endpoint: String,

    /// Pause between polling cycles in seconds.
    pub retry_time_secs: u64,

    /// Upper bound for a single outbound HTTP call in seconds.
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

const fn default_retry_time() -> u64 {
    DEFAULT_RETRY_TIME_SECS
}

const fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry_time_secs: default_retry_time(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl RelaySettings {
    /// Creates relay settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_lookup_with_defaults(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env_with_defaults`] over an arbitrary lookup.
    ///
    /// Unparsable or zero durations fall back to their defaults.
    #[must_use]
    pub fn from_lookup_with_defaults<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secs = |name: &str, default: u64| {
            lookup(name)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(default)
        };

        Self {
            endpoint: lookup("PRACTICUM_ENDPOINT")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(default_endpoint),
            retry_time_secs: secs("RETRY_TIME", default_retry_time()),
            request_timeout_secs: secs("REQUEST_TIMEOUT", default_request_timeout()),
        }
    }

    /// Pause between cycles.
    #[must_use]
    pub const fn retry_time(&self) -> Duration {
        Duration::from_secs(self.retry_time_secs)
    }

    /// Timeout applied to each HTTP request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<&'static str>),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_all_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]))
        .unwrap();

        assert_eq!(creds.practicum_token, "p-token");
        assert_eq!(creds.telegram_token, "t-token");
        assert_eq!(creds.chat_id, "12345");
    }

    #[test]
    fn test_credentials_missing_chat_id() {
        let err = Credentials::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
        ]))
        .unwrap_err();

        let ConfigError::MissingEnvVars(missing) = &err;
        assert_eq!(missing, &vec!["TELEGRAM_CHAT_ID"]);
        assert!(err.to_string().contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn test_credentials_empty_counts_as_missing() {
        let err = Credentials::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "  "),
            ("TELEGRAM_CHAT_ID", "1"),
        ]))
        .unwrap_err();

        let ConfigError::MissingEnvVars(missing) = err;
        assert_eq!(missing, vec!["PRACTICUM_TOKEN", "TELEGRAM_TOKEN"]);
    }

    #[test]
    fn test_debug_hides_tokens() {
        let creds = Credentials::new("secret-p".into(), "secret-t".into(), "42".into());
        let printed = format!("{creds:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("42"));
    }

    #[test]
    fn test_default_settings() {
        let settings = RelaySettings::default();
        assert_eq!(settings.retry_time_secs, 600);
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(
            settings.endpoint,
            "https://practicum.yandex.ru/api/user_api/homework_statuses/"
        );
    }

    #[test]
    fn test_settings_overrides_and_fallbacks() {
        let settings = RelaySettings::from_lookup_with_defaults(lookup_from(&[
            ("RETRY_TIME", "60"),
            ("REQUEST_TIMEOUT", "not-a-number"),
            ("PRACTICUM_ENDPOINT", "http://localhost:8080/statuses/"),
        ]));

        assert_eq!(settings.retry_time(), Duration::from_secs(60));
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.endpoint, "http://localhost:8080/statuses/");
    }
}
