//! Command handlers for the Telegram bot.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};
use weatherbot_models::ChatId as SubscriberChatId;
use weatherbot_notify::format_instant;

use crate::chat::{ChatService, StartOutcome, SubscribeOutcome, UnsubscribeOutcome, WeatherOutcome};
use crate::error::TelegramError;

pub const BLOCKED_REPLY: &str = "❌ You are blocked from using this bot.";
pub const NO_SENDER_REPLY: &str = "Error: Unable to get user details.";
pub const STORAGE_ERROR_REPLY: &str = "Something went wrong. Please try again later.";

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Register with the bot")]
    Start,

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Get daily weather updates: /subscribe <location>")]
    Subscribe(String),

    #[command(description = "Stop updates and remove your data")]
    Unsubscribe,

    #[command(description = "Current weather: /weather <location>")]
    Weather(String),
}

pub fn start_reply(outcome: &StartOutcome) -> String {
    match outcome {
        StartOutcome::Registered { name } => {
            format!("✅ Welcome {}! You have been registered successfully.", name)
        }
        StartOutcome::Blocked => BLOCKED_REPLY.to_string(),
    }
}

pub fn subscribe_reply(outcome: &SubscribeOutcome) -> String {
    match outcome {
        SubscribeOutcome::Subscribed { location } => {
            format!("✅ You are now subscribed for weather updates in {}!", location)
        }
        SubscribeOutcome::MissingLocation => {
            "⚠️ Please provide a location. Example: /subscribe New York".to_string()
        }
        SubscribeOutcome::Blocked => BLOCKED_REPLY.to_string(),
    }
}

pub fn unsubscribe_reply(outcome: &UnsubscribeOutcome) -> String {
    match outcome {
        UnsubscribeOutcome::Unsubscribed => "✅ You have been unsubscribed. Your data has been removed. \
             You can rejoin anytime by using /start."
            .to_string(),
        UnsubscribeOutcome::NotSubscribed => "⚠️ You are not subscribed.".to_string(),
    }
}

pub fn weather_reply(outcome: &WeatherOutcome) -> String {
    match outcome {
        WeatherOutcome::Report { location, snapshot } => format_instant(location, snapshot),
        WeatherOutcome::LookupFailed(_) => {
            "Error fetching weather data. Please try again later.".to_string()
        }
        WeatherOutcome::MissingLocation => {
            "⚠️ Please provide a city name. Example: /weather London".to_string()
        }
        WeatherOutcome::Blocked => BLOCKED_REPLY.to_string(),
    }
}

/// Turn a service result into reply text, logging storage failures.
fn reply_or_error<T>(
    chat_id: SubscriberChatId,
    command: &str,
    result: Result<T, TelegramError>,
    render: impl FnOnce(&T) -> String,
) -> String {
    match result {
        Ok(outcome) => render(&outcome),
        Err(e) => {
            error!(chat_id = %chat_id, command, error = %e, "Command failed");
            STORAGE_ERROR_REPLY.to_string()
        }
    }
}

/// Handle the /help command.
pub async fn handle_help(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

/// Dispatch commands to the chat service.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<ChatService>,
) -> ResponseResult<()> {
    if let Command::Help = cmd {
        return handle_help(bot, msg).await;
    }

    let Some(user) = msg.from.as_ref() else {
        bot.send_message(msg.chat.id, NO_SENDER_REPLY).await?;
        return Ok(());
    };

    let chat_id = SubscriberChatId(msg.chat.id.0);
    let first_name = Some(user.first_name.as_str());

    let reply = match cmd {
        Command::Start => reply_or_error(chat_id, "start", service.start(chat_id, first_name), start_reply),
        Command::Subscribe(location) => reply_or_error(
            chat_id,
            "subscribe",
            service.subscribe(chat_id, first_name, &location),
            subscribe_reply,
        ),
        Command::Unsubscribe => reply_or_error(
            chat_id,
            "unsubscribe",
            service.unsubscribe(chat_id),
            unsubscribe_reply,
        ),
        Command::Weather(location) => reply_or_error(
            chat_id,
            "weather",
            service.weather(chat_id, &location).await,
            weather_reply,
        ),
        Command::Help => return Ok(()),
    };

    bot.send_message(msg.chat.id, reply).await?;
    info!(chat_id = %chat_id, "Command handled");
    Ok(())
}
