//! Weather bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx WEATHER_API_KEY=yyy cargo run -p weatherbot-telegram
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use weatherbot_api::{serve, ApiConfig, AppState};
use weatherbot_core::config::{self, FRONTEND_URL_ENV, NOTIFY_AT_ENV, PORT_ENV};
use weatherbot_notify::{NotificationPipeline, PipelineConfig, Schedule};
use weatherbot_persistence::{SettingsStore, SubscriberStore};
use weatherbot_telegram::{build_bot, resolve_token, ChatService, TelegramNotifier, WeatherBot};
use weatherbot_weather::{ApiKeySource, TomorrowClient};

/// Weather Bot - daily weather updates on Telegram
#[derive(Parser, Debug)]
#[command(name = "weatherbot")]
#[command(about = "Telegram bot that sends subscribers a daily weather update")]
struct Args {
    /// Daily notification time in UTC (HH:MM)
    #[arg(long, env = NOTIFY_AT_ENV, default_value = "08:00")]
    notify_at: String,

    /// Notify at a fixed interval instead of daily (overrides --notify-at)
    #[arg(long)]
    notify_every_secs: Option<u64>,

    /// Subscribers processed concurrently per tick
    #[arg(long, default_value = "4")]
    concurrency: usize,

    /// Admin API host
    #[arg(long, default_value = "127.0.0.1")]
    admin_host: String,

    /// Admin API port
    #[arg(long, env = PORT_ENV, default_value = "3000")]
    admin_port: u16,

    /// Admin frontend origin allowed by CORS (any origin when unset)
    #[arg(long, env = FRONTEND_URL_ENV)]
    frontend_url: Option<String>,

    /// Do not start the admin API
    #[arg(long)]
    no_admin: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Env files first so clap's env fallbacks see them
    config::load_env_files();
    let args = Args::parse();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "weatherbot_telegram=info,weatherbot_notify=info,weatherbot_api=info,teloxide=warn",
        1 => "weatherbot_telegram=debug,weatherbot_notify=debug,weatherbot_weather=debug,weatherbot_api=debug,tower_http=debug,teloxide=info",
        2 => "weatherbot_telegram=trace,weatherbot_notify=trace,weatherbot_weather=trace,weatherbot_persistence=trace,weatherbot_api=trace,tower_http=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = config::ensure_all_dirs() {
        tracing::warn!(error = %e, "Failed to create all directories");
    }

    let data_dir = config::data_dir();
    let subscribers = Arc::new(SubscriberStore::new(&data_dir));
    let settings = SettingsStore::new(&data_dir);

    let schedule = match args.notify_every_secs {
        Some(secs) => Schedule::every(Duration::from_secs(secs))?,
        None => Schedule::daily_at(&args.notify_at)?,
    };

    let bot = build_bot(&resolve_token(&settings)?)?;
    let weather = Arc::new(TomorrowClient::new(ApiKeySource::Settings(settings.clone()))?);

    let pipeline = Arc::new(
        NotificationPipeline::new(
            subscribers.clone(),
            weather.clone(),
            Arc::new(TelegramNotifier::new(bot.clone())),
        )
        .with_config(PipelineConfig::new().with_max_concurrency(args.concurrency)),
    );

    if !args.no_admin {
        let api_config =
            ApiConfig::new(args.admin_host, args.admin_port).with_frontend_url(args.frontend_url);
        let state = AppState::new(api_config.clone(), subscribers.clone(), settings.clone())
            .with_pipeline(Arc::clone(&pipeline));
        tokio::spawn(async move {
            if let Err(e) = serve(api_config, state).await {
                tracing::error!(error = %e, "Admin API stopped");
            }
        });
    }

    let service = ChatService::new(subscribers, weather);
    let weather_bot = WeatherBot::new(bot, service, pipeline, schedule);

    match weather_bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n[weather] Weather Bot");
            println!("   Bot: @{}", username);
            println!("   Schedule: {}", schedule);
            println!("   Data: {}", data_dir.display());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\n[phone] Open Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    weather_bot.start_polling().await?;

    Ok(())
}
