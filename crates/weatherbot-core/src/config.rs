//! Shared configuration for the weather bot.
//!
//! # Storage Structure
//!
//! All application data is stored under `~/.weatherbot/`:
//!
//! ```text
//! ~/.weatherbot/
//! ├── data/         # Subscribers and settings
//! │   ├── subscribers/
//! │   └── settings.json
//! ├── logs/         # Application logs
//! └── config/       # User configuration files
//!     └── .env.local
//! ```
//!
//! # Environment Variables
//!
//! - `WEATHERBOT_STATE_DIR`: Override the base state directory
//! - `WEATHERBOT_DATA_DIR`: Override the data directory
//! - `TELEGRAM_BOT_TOKEN`: Bot token (a stored setting takes precedence)
//! - `WEATHER_API_KEY`: Tomorrow.io key (a stored setting takes precedence)
//! - `WEATHERBOT_NOTIFY_AT`: Daily notification time, `HH:MM` UTC
//! - `FRONTEND_URL`: Origin allowed to call the admin API
//! - `PORT`: Admin API port

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "WEATHERBOT_STATE_DIR";

/// Environment variable for custom data directory.
pub const DATA_DIR_ENV: &str = "WEATHERBOT_DATA_DIR";

pub const TELEGRAM_BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const WEATHER_API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const NOTIFY_AT_ENV: &str = "WEATHERBOT_NOTIFY_AT";
pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";
pub const PORT_ENV: &str = "PORT";
/// Overrides the Telegram Bot API base URL (local Bot API servers, tests).
pub const TELEGRAM_API_URL_ENV: &str = "TELEGRAM_API_URL";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".weatherbot";

const DATA_SUBDIR: &str = "data";
const LOGS_SUBDIR: &str = "logs";
const CONFIG_SUBDIR: &str = "config";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the state directory.
///
/// The state directory is determined by:
/// 1. `WEATHERBOT_STATE_DIR` environment variable if set
/// 2. `~/.weatherbot` if home directory is available
/// 3. `.weatherbot` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the data directory holding subscribers and settings.
///
/// Defaults to `~/.weatherbot/data/` or `WEATHERBOT_DATA_DIR` env var.
pub fn data_dir() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(DATA_SUBDIR))
}

/// Get the logs directory.
pub fn logs_dir() -> PathBuf {
    state_dir().join(LOGS_SUBDIR)
}

/// Get the user config directory.
pub fn config_dir() -> PathBuf {
    state_dir().join(CONFIG_SUBDIR)
}

/// Get the `.env.local` file path for secrets (API keys, tokens).
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Ensure the state directory and all subdirectories exist.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_all_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir())?;
    std::fs::create_dir_all(logs_dir())?;
    std::fs::create_dir_all(config_dir())?;
    Ok(())
}

/// Load environment files.
///
/// The config directory's `.env.local` is loaded first, then `.env.local` or
/// `.env` from the working directory. Variables already set in the process
/// environment are never overridden.
pub fn load_env_files() {
    load_env_from(&env_file());
    if dotenvy::from_filename(".env.local").is_err() {
        let _ = dotenvy::dotenv();
    }
}

fn load_env_from(path: &Path) {
    if path.exists() {
        match dotenvy::from_path(path) {
            Ok(()) => debug!(path = %path.display(), "Loaded env file"),
            Err(e) => debug!(path = %path.display(), error = %e, "Failed to load env file"),
        }
    }
}

/// Read an environment variable, treating blank values as unset.
pub fn env_non_blank(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables can't be isolated across parallel tests, so
    // these check path construction rather than absolute locations.

    #[test]
    fn test_state_dir_name() {
        let dir = state_dir();
        assert!(dir.is_absolute() || dir.ends_with(".weatherbot"));
    }

    #[test]
    fn test_logs_dir_name() {
        assert!(logs_dir().ends_with("logs"));
    }

    #[test]
    fn test_config_dir_name() {
        assert!(config_dir().ends_with("config"));
    }

    #[test]
    fn test_env_file_name() {
        assert!(env_file().ends_with(".env.local"));
    }

    #[test]
    fn test_env_non_blank() {
        std::env::set_var("WEATHERBOT_TEST_BLANK", "   ");
        std::env::set_var("WEATHERBOT_TEST_SET", " value ");

        assert_eq!(env_non_blank("WEATHERBOT_TEST_BLANK"), None);
        assert_eq!(env_non_blank("WEATHERBOT_TEST_SET").as_deref(), Some("value"));
        assert_eq!(env_non_blank("WEATHERBOT_TEST_NEVER_SET"), None);
    }

    #[test]
    fn test_load_env_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(&path, "WEATHERBOT_TEST_FROM_FILE=loaded\n").unwrap();

        load_env_from(&path);
        assert_eq!(env_non_blank("WEATHERBOT_TEST_FROM_FILE").as_deref(), Some("loaded"));
    }
}
