//! The notification pipeline.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use weatherbot_models::ChatId;

use crate::config::PipelineConfig;
use crate::error::{NotifyError, StoreError};
use crate::message::format_update;
use crate::report::{SubscriberOutcome, TickReport};
use crate::traits::{NotificationSink, SubscriberSource, WeatherResolver};

/// Sends one weather update to every eligible subscriber per tick.
///
/// The pipeline only reads subscribers; it never changes their state, not
/// even after a failed delivery.
pub struct NotificationPipeline {
    subscribers: Arc<dyn SubscriberSource>,
    weather: Arc<dyn WeatherResolver>,
    sink: Arc<dyn NotificationSink>,
    config: PipelineConfig,
    /// Held for the duration of a tick so scheduled and manual runs never overlap.
    running: Mutex<()>,
}

impl NotificationPipeline {
    pub fn new(
        subscribers: Arc<dyn SubscriberSource>,
        weather: Arc<dyn WeatherResolver>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            subscribers,
            weather,
            sink,
            config: PipelineConfig::default(),
            running: Mutex::new(()),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one batch pass.
    ///
    /// Fails only when the subscriber list cannot be read. Per-subscriber
    /// failures end up in the returned report.
    pub async fn run_tick(&self) -> Result<TickReport, StoreError> {
        let _running = self.running.lock().await;
        let started_at = Utc::now();
        let subscribers = self.subscribers.active_subscribers().await?;
        let listed = subscribers.len();

        let mut targets = Vec::with_capacity(listed);
        let mut skipped_no_location = 0;
        for subscriber in subscribers {
            match subscriber
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
            {
                Some(location) => targets.push((subscriber.chat_id, location.to_string())),
                None => {
                    debug!(chat_id = %subscriber.chat_id, "Skipping subscriber without location");
                    skipped_no_location += 1;
                }
            }
        }

        debug!(
            listed,
            targets = targets.len(),
            concurrency = self.config.max_concurrency,
            "Starting weather tick"
        );

        let outcomes: Vec<SubscriberOutcome> = stream::iter(targets)
            .map(|(chat_id, location)| self.notify(chat_id, location))
            .buffer_unordered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let report = TickReport {
            started_at,
            finished_at: Utc::now(),
            listed,
            skipped_no_location,
            outcomes,
        };

        info!(
            listed = report.listed,
            skipped = report.skipped_no_location,
            delivered = report.delivered(),
            provider_failures = report.provider_failures(),
            delivery_failures = report.delivery_failures(),
            "Weather tick complete"
        );

        Ok(report)
    }

    async fn notify(&self, chat_id: ChatId, location: String) -> SubscriberOutcome {
        let result = self.resolve_and_deliver(chat_id, &location).await;

        match &result {
            Ok(()) => debug!(chat_id = %chat_id, location = %location, "Weather update sent"),
            Err(e) => warn!(chat_id = %chat_id, location = %location, error = %e, "Weather update failed"),
        }

        SubscriberOutcome {
            chat_id,
            location,
            result,
        }
    }

    async fn resolve_and_deliver(&self, chat_id: ChatId, location: &str) -> Result<(), NotifyError> {
        let snapshot = self.weather.resolve(location).await?;
        let message = format_update(&snapshot);
        self.sink.deliver(chat_id, &message).await?;
        Ok(())
    }
}
