//! Settings store.

use std::path::PathBuf;

use chrono::Utc;
use weatherbot_models::BotSettings;

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::Result;

/// Persists the single [`BotSettings`] record in `base_path/settings.json`.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    base_path: PathBuf,
}

impl SettingsStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn path(&self) -> PathBuf {
        self.base_path.join("settings.json")
    }

    /// Loads the stored settings, or None if nothing was ever saved.
    pub fn load(&self) -> Result<Option<BotSettings>> {
        read_json_optional(&self.path())
    }

    /// Loads the stored settings, falling back to empty settings.
    pub fn load_or_default(&self) -> Result<BotSettings> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Replaces the stored settings and stamps `updated_at`.
    pub fn save(&self, settings: &BotSettings) -> Result<BotSettings> {
        let mut settings = settings.clone();
        settings.updated_at = Some(Utc::now());
        atomic_write_json(&self.path(), &settings)?;
        Ok(settings)
    }

    /// Stored weather API key, if set and not blank.
    pub fn weather_api_key(&self) -> Result<Option<String>> {
        Ok(self
            .load()?
            .and_then(|s| s.weather_api_key().map(str::to_string)))
    }

    /// Stored Telegram bot token, if set and not blank.
    pub fn telegram_bot_token(&self) -> Result<Option<String>> {
        Ok(self
            .load()?
            .and_then(|s| s.telegram_bot_token().map(str::to_string)))
    }
}
