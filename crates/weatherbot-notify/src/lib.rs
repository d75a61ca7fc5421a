//! Scheduled weather notifications.
//!
//! On every tick the [`NotificationPipeline`] lists active subscribers,
//! resolves the weather for each subscriber's location and delivers one
//! message per subscriber. A failure for one subscriber (weather lookup or
//! delivery) is recorded in the [`TickReport`] and logged, and the batch
//! carries on. Only an unavailable subscriber store aborts a tick.
//!
//! The pipeline reaches its collaborators through three traits:
//!
//! - [`SubscriberSource`]: who to notify (implemented for `SubscriberStore`)
//! - [`WeatherResolver`]: current weather (implemented for `TomorrowClient`)
//! - [`NotificationSink`]: message delivery (the Telegram bot implements it)
//!
//! The [`Scheduler`] owns the cadence and drives the pipeline until shutdown.

pub mod config;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod report;
pub mod scheduler;
pub mod traits;

pub use config::{PipelineConfig, Schedule};
pub use error::{DeliveryError, NotifyError, ScheduleError, StoreError};
pub use message::{format_instant, format_update};
pub use pipeline::NotificationPipeline;
pub use report::{SubscriberOutcome, TickReport, TickSummary};
pub use scheduler::Scheduler;
pub use traits::{NotificationSink, SubscriberSource, WeatherResolver};
