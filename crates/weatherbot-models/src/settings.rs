//! Bot settings editable from the admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials stored by administrators.
///
/// A non-blank stored value takes precedence over the matching environment
/// variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotSettings {
    #[serde(default)]
    pub weather_api_key: String,

    #[serde(default)]
    pub telegram_bot_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BotSettings {
    pub fn new(weather_api_key: impl Into<String>, telegram_bot_token: impl Into<String>) -> Self {
        Self {
            weather_api_key: weather_api_key.into(),
            telegram_bot_token: telegram_bot_token.into(),
            updated_at: Some(Utc::now()),
        }
    }

    /// Returns the stored weather API key if it is not blank.
    pub fn weather_api_key(&self) -> Option<&str> {
        non_blank(&self.weather_api_key)
    }

    /// Returns the stored bot token if it is not blank.
    pub fn telegram_bot_token(&self) -> Option<&str> {
        non_blank(&self.telegram_bot_token)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
