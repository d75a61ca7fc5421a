//! Core data models for the weather subscription bot.
//!
//! This crate provides the types shared by every other crate in the
//! workspace: subscribers, weather snapshots and bot settings.

pub mod ids;
pub mod settings;
pub mod subscriber;
pub mod weather;

// Re-export main types
pub use ids::{ChatId, ParseChatIdError, SubscriberId};
pub use settings::BotSettings;
pub use subscriber::{EligibleSubscriber, Subscriber};
pub use weather::{WeatherCondition, WeatherSnapshot};
