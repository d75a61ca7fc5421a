//! Error types for the Telegram bot.

use thiserror::Error;
use weatherbot_persistence::PersistenceError;

/// Errors that can occur in the Telegram bot.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Bot token not provided in settings or environment.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN or store it in the admin settings.")]
    NoToken,

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Invalid Telegram API URL override.
    #[error("Invalid Telegram API URL '{0}'")]
    InvalidApiUrl(String),

    /// Subscriber or settings store error.
    #[error("Storage error: {0}")]
    Storage(#[from] PersistenceError),
}

/// Result type for Telegram operations.
pub type Result<T> = std::result::Result<T, TelegramError>;

impl From<teloxide::RequestError> for TelegramError {
    fn from(e: teloxide::RequestError) -> Self {
        TelegramError::BotStartFailed(e.to_string())
    }
}
