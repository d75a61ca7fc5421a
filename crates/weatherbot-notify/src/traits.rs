//! Collaborator traits used by the pipeline.

use async_trait::async_trait;
use weatherbot_models::{ChatId, EligibleSubscriber, WeatherSnapshot};
use weatherbot_persistence::SubscriberStore;
use weatherbot_weather::{ProviderError, TomorrowClient};

use crate::error::{DeliveryError, StoreError};

/// Lists the subscribers a tick should consider.
#[async_trait]
pub trait SubscriberSource: Send + Sync {
    /// All subscribers with `is_active = true`, projected to chat id and
    /// location. Locations may be blank.
    async fn active_subscribers(&self) -> Result<Vec<EligibleSubscriber>, StoreError>;
}

/// Resolves current weather for a location.
#[async_trait]
pub trait WeatherResolver: Send + Sync {
    async fn resolve(&self, location: &str) -> Result<WeatherSnapshot, ProviderError>;
}

/// Delivers a text message to a chat.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, chat_id: ChatId, message: &str) -> Result<(), DeliveryError>;
}

#[async_trait]
impl SubscriberSource for SubscriberStore {
    async fn active_subscribers(&self) -> Result<Vec<EligibleSubscriber>, StoreError> {
        Ok(self.list_active()?)
    }
}

#[async_trait]
impl WeatherResolver for TomorrowClient {
    async fn resolve(&self, location: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.realtime(location).await
    }
}
