//! Telegram Bot API notifier.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{Credentials, RelaySettings};
use crate::error::RelayError;

/// Default Bot API host.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Delivers notification text to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message to the configured chat.
    async fn send_message(&self, text: &str) -> Result<(), RelayError>;
}

#[derive(Debug, Deserialize)]
struct TgResponse {
    ok: bool,
    description: Option<String>,
}

/// Bot API client bound to a single destination chat.
pub struct TelegramBot {
    client: reqwest::Client,
    base_url: String,
    chat_id: String,
}

impl TelegramBot {
    /// Creates a bot for the chat named in `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(credentials: &Credentials, settings: &RelaySettings) -> Result<Self, reqwest::Error> {
        Self::with_api_base(credentials, settings, TELEGRAM_API_BASE)
    }

    /// Creates a bot talking to a custom Bot API host.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_api_base(
        credentials: &Credentials,
        settings: &RelaySettings,
        api_base: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: format!(
                "{}/bot{}",
                api_base.trim_end_matches('/'),
                credentials.telegram_token
            ),
            chat_id: credentials.chat_id.clone(),
        })
    }

    /// Destination chat id.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send_message(&self, text: &str) -> Result<(), RelayError> {
        debug!("Sending message to chat {}: \"{}\"", self.chat_id, truncate_for_log(text, 40));

        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        // The URL embeds the bot token; keep it out of error messages.
        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Notify(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RelayError::Notify(format!(
                "Telegram returned HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let reply: TgResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Notify(e.without_url().to_string()))?;

        if !reply.ok {
            return Err(RelayError::Notify(
                reply
                    .description
                    .unwrap_or_else(|| "request rejected".to_owned()),
            ));
        }

        info!("Message delivered to chat {}", self.chat_id);
        Ok(())
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

/// Truncates a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}
