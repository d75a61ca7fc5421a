//! HTTP client for the Tomorrow.io realtime endpoint.

use std::time::Duration;

use tracing::{debug, warn};
use weatherbot_models::WeatherSnapshot;

use crate::error::{ProviderError, Result};
use crate::key::ApiKeySource;
use crate::response::parse_realtime;

/// Tomorrow.io API host.
pub const DEFAULT_BASE_URL: &str = "https://api.tomorrow.io";

/// Per-request timeout. A timeout is a failure for that one lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const REALTIME_PATH: &str = "/v4/weather/realtime";

/// Longest provider error body kept in an error message.
const MAX_ERROR_BODY: usize = 300;

/// Realtime weather client.
#[derive(Clone)]
pub struct TomorrowClient {
    client: reqwest::Client,
    base_url: String,
    keys: ApiKeySource,
}

impl TomorrowClient {
    /// Create a client with the default base URL and timeout.
    pub fn new(keys: ApiKeySource) -> Result<Self> {
        Self::with_timeout(keys, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(keys: ApiKeySource, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            keys,
        })
    }

    /// Point the client at another host (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch the current weather for a location.
    pub async fn realtime(&self, location: &str) -> Result<WeatherSnapshot> {
        let api_key = self.keys.resolve()?;
        let url = format!("{}{}", self.base_url, REALTIME_PATH);

        debug!(location = %location, "Requesting realtime weather");

        let response = self
            .client
            .get(&url)
            .query(&[("location", location), ("apikey", api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(location = %location, status = status.as_u16(), "Weather API error");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        parse_realtime(&body)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
