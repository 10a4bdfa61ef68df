//! HTTP client for the homework statuses endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

use crate::config::RelaySettings;
use crate::error::RelayError;

/// Source of homework status updates.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetches the statuses changed since `from_date` (Unix seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value, RelayError>;
}

/// Review API client authenticated with a pre-issued OAuth token.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

impl PracticumClient {
    /// Creates a client for the endpoint configured in `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(token: &str, settings: &RelaySettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            auth_header: format!("OAuth {token}"),
        })
    }

    /// Endpoint this client polls.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, RelayError> {
        debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| RelayError::Connection(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RelayError::MalformedResponse(format!("body is not valid JSON: {e}")))
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
