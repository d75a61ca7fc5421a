//! Application state shared across handlers.

use std::sync::Arc;

use weatherbot_models::{ChatId, Subscriber};
use weatherbot_notify::NotificationPipeline;
use weatherbot_persistence::{SettingsStore, SubscriberStore};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Subscriber store, shared with the chat handlers.
    pub subscribers: Arc<SubscriberStore>,
    /// Bot settings.
    pub settings: SettingsStore,
    /// Pipeline for manual ticks (None when the bot is not running).
    pub pipeline: Option<Arc<NotificationPipeline>>,
}

impl AppState {
    pub fn new(config: ApiConfig, subscribers: Arc<SubscriberStore>, settings: SettingsStore) -> Self {
        Self {
            config: Arc::new(config),
            subscribers,
            settings,
            pipeline: None,
        }
    }

    /// Enables `POST /admin/notify`.
    pub fn with_pipeline(mut self, pipeline: Arc<NotificationPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Loads a subscriber, mapping a missing record to 404.
    pub fn subscriber(&self, chat_id: ChatId) -> Result<Subscriber> {
        self.subscribers
            .get(chat_id)?
            .ok_or_else(|| ApiError::NotFound(format!("user with chat id {} not found", chat_id)))
    }
}

/// Parses a `:chat_id` path segment.
pub fn parse_chat_id(raw: &str) -> Result<ChatId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid chat id: {}", raw)))
}
