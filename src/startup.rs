//! Startup sequence: credentials, settings, then clients.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, Credentials, RelaySettings};
use crate::practicum::PracticumClient;
use crate::relay::StatusRelay;
use crate::telegram::TelegramBot;

/// Errors that stop the bot before the relay loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Builds the relay from the process environment.
pub fn build_relay_from_env() -> Result<StatusRelay, StartupError> {
    build_relay(|name| std::env::var(name).ok())
}

/// Builds the relay from an arbitrary variable lookup.
///
/// Credentials are checked first; no client exists, and so no request can
/// be made, unless every required variable is present. Building the clients
/// itself sends nothing: the first request happens on the first relay cycle.
pub fn build_relay<F>(lookup: F) -> Result<StatusRelay, StartupError>
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = Credentials::from_lookup(&lookup)?;

    let settings = RelaySettings::from_lookup_with_defaults(&lookup);
    debug!("Relay settings: {:?}", settings);

    let api = PracticumClient::new(&credentials.practicum_token, &settings)?;
    let bot = TelegramBot::new(&credentials, &settings)?;

    info!("Polling {} for chat {}", api.endpoint(), bot.chat_id());

    Ok(StatusRelay::new(
        Box::new(api),
        Box::new(bot),
        settings.retry_time(),
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use tokio::net::TcpListener;

    use super::*;

    fn lookup_from(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&'static str, String> = pairs.into_iter().collect();
        move |name: &str| map.get(name).cloned()
    }

    #[tokio::test]
    async fn test_missing_chat_id_stops_before_any_request() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/", listener.local_addr().unwrap());

        let result = build_relay(lookup_from(vec![
            ("PRACTICUM_TOKEN", "p-token".to_owned()),
            ("TELEGRAM_TOKEN", "t-token".to_owned()),
            ("PRACTICUM_ENDPOINT", endpoint),
        ]));

        match result {
            Err(StartupError::Config(ConfigError::MissingEnvVars(missing))) => {
                assert_eq!(missing, vec!["TELEGRAM_CHAT_ID"]);
            }
            other => panic!("expected missing credentials, got {other:?}"),
        }

        let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
        assert!(accepted.is_err(), "review API was contacted");
    }

    #[tokio::test]
    async fn test_complete_environment_builds_relay() {
        let relay = build_relay(lookup_from(vec![
            ("PRACTICUM_TOKEN", "p-token".to_owned()),
            ("TELEGRAM_TOKEN", "t-token".to_owned()),
            ("TELEGRAM_CHAT_ID", "42".to_owned()),
            ("RETRY_TIME", "60".to_owned()),
        ]))
        .unwrap();

        assert_eq!(relay.state().tracked(), 0);
        assert!(relay.state().poll_cursor() > 0);
    }
}
