//! Telegram bot for weather subscriptions.
//!
//! Users register with the bot, store a location and receive a daily weather
//! update for it. The same process runs the notification scheduler and,
//! optionally, the admin REST API.
//!
//! # Environment Variables
//!
//! Required (unless stored through the admin settings):
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//! - `WEATHER_API_KEY`: Tomorrow.io API key
//!
//! Optional:
//! - `WEATHERBOT_NOTIFY_AT`: Daily notification time, `HH:MM` UTC (default: 08:00)
//! - `PORT`: Admin API port (default: 3000)
//! - `FRONTEND_URL`: Allowed CORS origin for the admin frontend
//! - `TELEGRAM_API_URL`: Custom Bot API server
//!
//! # Commands
//!
//! - `/start` - Register with the bot
//! - `/help` - Show available commands
//! - `/subscribe <location>` - Receive daily updates for a location
//! - `/unsubscribe` - Stop updates and delete your data
//! - `/weather <location>` - Current weather for a location

pub mod bot;
pub mod chat;
pub mod delivery;
pub mod error;
pub mod handlers;

pub use bot::{build_bot, resolve_token, WeatherBot};
pub use chat::ChatService;
pub use delivery::TelegramNotifier;
pub use error::{Result, TelegramError};
pub use handlers::Command;
