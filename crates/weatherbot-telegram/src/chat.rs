//! Subscription state machine behind the chat commands.
//!
//! [`ChatService`] works on chat ids and plain strings so it can be driven
//! without Telegram. The handlers turn its outcomes into replies.

use std::sync::Arc;

use tracing::{debug, info, warn};
use weatherbot_models::{ChatId, WeatherSnapshot};
use weatherbot_notify::WeatherResolver;
use weatherbot_persistence::SubscriberStore;
use weatherbot_weather::ProviderError;

use crate::error::Result;

/// Name used when Telegram gives no first name.
pub const DEFAULT_NAME: &str = "User";

#[derive(Debug, PartialEq)]
pub enum StartOutcome {
    Registered { name: String },
    Blocked,
}

#[derive(Debug, PartialEq)]
pub enum SubscribeOutcome {
    Subscribed { location: String },
    MissingLocation,
    Blocked,
}

#[derive(Debug, PartialEq)]
pub enum UnsubscribeOutcome {
    Unsubscribed,
    NotSubscribed,
}

#[derive(Debug)]
pub enum WeatherOutcome {
    Report {
        location: String,
        snapshot: WeatherSnapshot,
    },
    LookupFailed(ProviderError),
    MissingLocation,
    Blocked,
}

/// Handles subscription commands against the subscriber store.
#[derive(Clone)]
pub struct ChatService {
    subscribers: Arc<SubscriberStore>,
    weather: Arc<dyn WeatherResolver>,
}

impl ChatService {
    pub fn new(subscribers: Arc<SubscriberStore>, weather: Arc<dyn WeatherResolver>) -> Self {
        Self {
            subscribers,
            weather,
        }
    }

    pub fn subscribers(&self) -> &Arc<SubscriberStore> {
        &self.subscribers
    }

    /// Existing subscribers with `is_active = false` are blocked. Unknown
    /// chats never are.
    pub fn is_blocked(&self, chat_id: ChatId) -> Result<bool> {
        Ok(self
            .subscribers
            .get(chat_id)?
            .is_some_and(|s| s.is_blocked()))
    }

    /// `/start`: register the chat, keeping any stored location.
    pub fn start(&self, chat_id: ChatId, first_name: Option<&str>) -> Result<StartOutcome> {
        let name = display_name(first_name);
        if self.subscribers.upsert(chat_id, &name, None)?.is_blocked() {
            info!(chat_id = %chat_id, "Blocked user tried /start");
            return Ok(StartOutcome::Blocked);
        }
        info!(chat_id = %chat_id, "User registered");

        Ok(StartOutcome::Registered { name })
    }

    /// `/subscribe <location>`: store the location, registering unknown chats.
    pub fn subscribe(
        &self,
        chat_id: ChatId,
        first_name: Option<&str>,
        location: &str,
    ) -> Result<SubscribeOutcome> {
        let location = location.trim();
        if location.is_empty() {
            if self.is_blocked(chat_id)? {
                return Ok(SubscribeOutcome::Blocked);
            }
            return Ok(SubscribeOutcome::MissingLocation);
        }

        let name = display_name(first_name);
        if self
            .subscribers
            .upsert(chat_id, &name, Some(location))?
            .is_blocked()
        {
            return Ok(SubscribeOutcome::Blocked);
        }
        info!(chat_id = %chat_id, location = %location, "User subscribed");

        Ok(SubscribeOutcome::Subscribed {
            location: location.to_string(),
        })
    }

    /// `/unsubscribe`: remove the subscriber record entirely.
    pub fn unsubscribe(&self, chat_id: ChatId) -> Result<UnsubscribeOutcome> {
        if self.subscribers.delete(chat_id)? {
            info!(chat_id = %chat_id, "User unsubscribed and removed");
            Ok(UnsubscribeOutcome::Unsubscribed)
        } else {
            Ok(UnsubscribeOutcome::NotSubscribed)
        }
    }

    /// `/weather <location>`: look up current weather on demand.
    ///
    /// Registered users also get the location stored for scheduled updates.
    pub async fn weather(&self, chat_id: ChatId, location: &str) -> Result<WeatherOutcome> {
        if self.is_blocked(chat_id)? {
            return Ok(WeatherOutcome::Blocked);
        }

        let location = location.trim();
        if location.is_empty() {
            return Ok(WeatherOutcome::MissingLocation);
        }

        if self.subscribers.get(chat_id)?.is_some() {
            self.subscribers.set_location(chat_id, location)?;
            debug!(chat_id = %chat_id, location = %location, "Stored location from /weather");
        }

        match self.weather.resolve(location).await {
            Ok(snapshot) => Ok(WeatherOutcome::Report {
                location: location.to_string(),
                snapshot,
            }),
            Err(e) => {
                warn!(chat_id = %chat_id, location = %location, error = %e, "Instant weather lookup failed");
                Ok(WeatherOutcome::LookupFailed(e))
            }
        }
    }
}

fn display_name(first_name: Option<&str>) -> String {
    first_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::{tempdir, TempDir};
    use weatherbot_models::{Subscriber, WeatherCondition};

    struct FixedWeather;

    #[async_trait]
    impl WeatherResolver for FixedWeather {
        async fn resolve(&self, location: &str) -> std::result::Result<WeatherSnapshot, ProviderError> {
            if location == "Nowhere" {
                return Err(ProviderError::Status {
                    status: 400,
                    body: "invalid location".to_string(),
                });
            }
            Ok(WeatherSnapshot::new(18.0, WeatherCondition::Cloudy, 70.0))
        }
    }

    fn service() -> (TempDir, ChatService) {
        let dir = tempdir().unwrap();
        let store = Arc::new(SubscriberStore::new(dir.path()));
        (dir, ChatService::new(store, Arc::new(FixedWeather)))
    }

    fn block(service: &ChatService, chat_id: i64) {
        service
            .subscribers()
            .save(&Subscriber::new(chat_id, "Blocked").with_active(false))
            .unwrap();
    }

    #[test]
    fn test_start_registers_new_user_without_location() {
        let (_dir, service) = service();

        let outcome = service.start(ChatId(5), Some("Ada")).unwrap();
        assert_eq!(
            outcome,
            StartOutcome::Registered {
                name: "Ada".to_string()
            }
        );

        let stored = service.subscribers().load(ChatId(5)).unwrap();
        assert!(stored.is_active);
        assert_eq!(stored.name, "Ada");
        assert!(stored.location().is_none());
    }

    #[test]
    fn test_start_defaults_name() {
        let (_dir, service) = service();
        assert_eq!(
            service.start(ChatId(5), None).unwrap(),
            StartOutcome::Registered {
                name: "User".to_string()
            }
        );
    }

    #[test]
    fn test_start_keeps_existing_location() {
        let (_dir, service) = service();
        service.subscribe(ChatId(5), Some("Ada"), "Berlin").unwrap();

        service.start(ChatId(5), Some("Ada L.")).unwrap();

        let stored = service.subscribers().load(ChatId(5)).unwrap();
        assert_eq!(stored.name, "Ada L.");
        assert_eq!(stored.location(), Some("Berlin"));
    }

    #[test]
    fn test_blocked_user_is_refused() {
        let (_dir, service) = service();
        block(&service, 9);

        assert_eq!(service.start(ChatId(9), Some("X")).unwrap(), StartOutcome::Blocked);
        assert_eq!(
            service.subscribe(ChatId(9), Some("X"), "Rome").unwrap(),
            SubscribeOutcome::Blocked
        );

        // Still blocked, location untouched
        let stored = service.subscribers().load(ChatId(9)).unwrap();
        assert!(!stored.is_active);
        assert!(stored.location().is_none());
    }

    #[test]
    fn test_start_after_admin_block_stays_blocked() {
        let (_dir, service) = service();
        service.subscribe(ChatId(9), Some("Ann"), "Berlin").unwrap();
        service.subscribers().set_active(ChatId(9), false).unwrap();

        assert_eq!(service.start(ChatId(9), Some("Ann")).unwrap(), StartOutcome::Blocked);

        let stored = service.subscribers().load(ChatId(9)).unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.location(), Some("Berlin"));
    }

    #[test]
    fn test_blocked_user_with_blank_location_is_refused() {
        let (_dir, service) = service();
        block(&service, 9);

        assert_eq!(
            service.subscribe(ChatId(9), Some("X"), "  ").unwrap(),
            SubscribeOutcome::Blocked
        );
    }

    #[tokio::test]
    async fn test_blocked_user_cannot_query_weather() {
        let (_dir, service) = service();
        block(&service, 9);

        let outcome = service.weather(ChatId(9), "Rome").await.unwrap();
        assert!(matches!(outcome, WeatherOutcome::Blocked));
    }

    #[test]
    fn test_subscribe_rejects_blank_location() {
        let (_dir, service) = service();
        assert_eq!(
            service.subscribe(ChatId(1), None, "   ").unwrap(),
            SubscribeOutcome::MissingLocation
        );
        assert!(service.subscribers().get(ChatId(1)).unwrap().is_none());
    }

    #[test]
    fn test_subscribe_registers_unknown_user() {
        let (_dir, service) = service();

        let outcome = service.subscribe(ChatId(1), Some("Bo"), " New York ").unwrap();
        assert_eq!(
            outcome,
            SubscribeOutcome::Subscribed {
                location: "New York".to_string()
            }
        );

        let stored = service.subscribers().load(ChatId(1)).unwrap();
        assert!(stored.is_eligible());
        assert_eq!(stored.location(), Some("New York"));
    }

    #[test]
    fn test_unsubscribe_deletes_record() {
        let (_dir, service) = service();
        service.start(ChatId(3), Some("Cy")).unwrap();

        assert_eq!(service.unsubscribe(ChatId(3)).unwrap(), UnsubscribeOutcome::Unsubscribed);
        assert!(service.subscribers().get(ChatId(3)).unwrap().is_none());
        assert_eq!(service.unsubscribe(ChatId(3)).unwrap(), UnsubscribeOutcome::NotSubscribed);
    }

    #[test]
    fn test_unsubscribe_then_start_rejoins() {
        let (_dir, service) = service();
        service.subscribe(ChatId(3), Some("Cy"), "Oslo").unwrap();
        service.unsubscribe(ChatId(3)).unwrap();

        service.start(ChatId(3), Some("Cy")).unwrap();
        let stored = service.subscribers().load(ChatId(3)).unwrap();
        assert!(stored.is_active);
        assert!(stored.location().is_none());
    }

    #[tokio::test]
    async fn test_weather_stores_location_for_registered_user() {
        let (_dir, service) = service();
        service.start(ChatId(4), Some("Di")).unwrap();

        let outcome = service.weather(ChatId(4), "Lima").await.unwrap();
        match outcome {
            WeatherOutcome::Report { location, snapshot } => {
                assert_eq!(location, "Lima");
                assert_eq!(snapshot.temperature, 18.0);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            service.subscribers().load(ChatId(4)).unwrap().location(),
            Some("Lima")
        );
    }

    #[tokio::test]
    async fn test_weather_for_unknown_user_does_not_register() {
        let (_dir, service) = service();

        let outcome = service.weather(ChatId(4), "Lima").await.unwrap();
        assert!(matches!(outcome, WeatherOutcome::Report { .. }));
        assert!(service.subscribers().get(ChatId(4)).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_weather_lookup_failure() {
        let (_dir, service) = service();

        let outcome = service.weather(ChatId(4), "Nowhere").await.unwrap();
        assert!(matches!(outcome, WeatherOutcome::LookupFailed(_)));
    }

    #[tokio::test]
    async fn test_weather_requires_location() {
        let (_dir, service) = service();
        let outcome = service.weather(ChatId(4), "").await.unwrap();
        assert!(matches!(outcome, WeatherOutcome::MissingLocation));
    }
}
