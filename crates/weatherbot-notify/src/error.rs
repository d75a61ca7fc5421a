//! Error types for the notification pipeline.

use thiserror::Error;
use weatherbot_models::ChatId;
use weatherbot_persistence::PersistenceError;
use weatherbot_weather::ProviderError;

/// The subscriber list could not be read. Aborts the whole tick.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("subscriber store unavailable: {0}")]
    Unavailable(String),
}

impl From<PersistenceError> for StoreError {
    fn from(e: PersistenceError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// A message could not be delivered to one subscriber.
#[derive(Debug, Error)]
#[error("delivery to {chat_id} failed: {reason}")]
pub struct DeliveryError {
    pub chat_id: ChatId,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(chat_id: ChatId, reason: impl Into<String>) -> Self {
        Self {
            chat_id,
            reason: reason.into(),
        }
    }
}

/// Why a single subscriber was not notified.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Weather lookup failed; nothing was sent.
    #[error("weather lookup failed: {0}")]
    Provider(#[from] ProviderError),

    /// Weather was resolved but the message did not go out.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl NotifyError {
    pub fn is_provider(&self) -> bool {
        matches!(self, NotifyError::Provider(_))
    }

    pub fn is_delivery(&self) -> bool {
        matches!(self, NotifyError::Delivery(_))
    }
}

/// Invalid schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid notification time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("notification interval must be greater than zero")]
    ZeroInterval,
}
