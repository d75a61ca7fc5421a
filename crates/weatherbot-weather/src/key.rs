//! API key resolution.

use weatherbot_core::config::{env_non_blank, WEATHER_API_KEY_ENV};
use weatherbot_persistence::SettingsStore;

use crate::error::{ProviderError, Result};

/// Where the Tomorrow.io API key comes from.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    /// A fixed key (tests, one-off tools).
    Static(String),
    /// The key stored in settings, falling back to `WEATHER_API_KEY`.
    Settings(SettingsStore),
}

impl ApiKeySource {
    /// Resolves the key to use for the next request.
    pub fn resolve(&self) -> Result<String> {
        match self {
            ApiKeySource::Static(key) => {
                let key = key.trim();
                if key.is_empty() {
                    Err(ProviderError::MissingApiKey)
                } else {
                    Ok(key.to_string())
                }
            }
            ApiKeySource::Settings(store) => {
                let stored = store
                    .weather_api_key()
                    .map_err(|e| ProviderError::Settings(e.to_string()))?;
                stored
                    .or_else(|| env_non_blank(WEATHER_API_KEY_ENV))
                    .ok_or(ProviderError::MissingApiKey)
            }
        }
    }
}
