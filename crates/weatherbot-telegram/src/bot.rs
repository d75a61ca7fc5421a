//! Main Telegram bot implementation.

use std::sync::Arc;

use teloxide::prelude::*;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use url::Url;
use weatherbot_core::config::{env_non_blank, TELEGRAM_API_URL_ENV, TELEGRAM_BOT_TOKEN_ENV};
use weatherbot_notify::{NotificationPipeline, Schedule, Scheduler};
use weatherbot_persistence::SettingsStore;

use crate::chat::ChatService;
use crate::error::{Result, TelegramError};
use crate::handlers::{handle_command, Command};

/// Resolves the bot token: the stored setting wins over `TELEGRAM_BOT_TOKEN`.
pub fn resolve_token(settings: &SettingsStore) -> Result<String> {
    settings
        .telegram_bot_token()?
        .or_else(|| env_non_blank(TELEGRAM_BOT_TOKEN_ENV))
        .ok_or(TelegramError::NoToken)
}

/// Creates a teloxide `Bot`, honouring `TELEGRAM_API_URL` when set.
pub fn build_bot(token: &str) -> Result<Bot> {
    let bot = Bot::new(token);
    match env_non_blank(TELEGRAM_API_URL_ENV) {
        Some(raw) => {
            let url = Url::parse(&raw).map_err(|_| TelegramError::InvalidApiUrl(raw.clone()))?;
            debug!(url = %url, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// The weather subscription bot.
pub struct WeatherBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Command state machine shared across handlers.
    service: Arc<ChatService>,
    /// Pipeline driven by the scheduler.
    pipeline: Arc<NotificationPipeline>,
    /// Notification cadence.
    schedule: Schedule,
}

impl WeatherBot {
    pub fn new(
        bot: Bot,
        service: ChatService,
        pipeline: Arc<NotificationPipeline>,
        schedule: Schedule,
    ) -> Self {
        Self {
            bot,
            service: Arc::new(service),
            pipeline,
            schedule,
        }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }

    /// Run the scheduler and the long-polling dispatcher until Ctrl+C.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting Telegram bot in polling mode...");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut scheduler = Scheduler::new(Arc::clone(&self.pipeline), self.schedule, shutdown_rx);
        let scheduler_handle = tokio::spawn(async move { scheduler.run().await });

        let service = Arc::clone(&self.service);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let service = Arc::clone(&service);
                        debug!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, service).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(|bot: Bot, msg: Message| async move {
                        if let Some(text) = msg.text() {
                            let command = text.split_whitespace().next().unwrap_or(text);
                            bot.send_message(
                                msg.chat.id,
                                format!("Unknown command: {}\n\nUse /help to see available commands.", command),
                            )
                            .await?;
                        }
                        respond(())
                    }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|upd| async move {
                debug!("Unhandled update: {:?}", upd.kind);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Dispatcher stopped, shutting down scheduler");
        if shutdown_tx.send(true).is_err() {
            warn!("Scheduler already stopped");
        }
        match scheduler_handle.await {
            Ok(ticks) => info!(ticks, "Scheduler finished"),
            Err(e) => error!(error = %e, "Scheduler task failed"),
        }

        Ok(())
    }
}
