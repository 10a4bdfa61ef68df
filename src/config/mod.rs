//! Configuration module for the homework status bot.
//!
//! Handles loading of the pre-issued credentials and the polling
//! tunables from the environment.

mod settings;

pub use settings::{ConfigError, Credentials, RelaySettings};

/// Environment variable holding the review API token.
pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";

/// Environment variable holding the Telegram bot token.
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the destination chat id.
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Homework statuses endpoint of the review API.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Pause between polling cycles.
pub const DEFAULT_RETRY_TIME_SECS: u64 = 600;

/// Bound on every outbound HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
