//! Admin REST API for the weather bot.
//!
//! This crate exposes the subscriber store and bot settings to an admin
//! frontend:
//! - Subscriber listing, lookup, block/unblock and deletion
//! - Bot settings (weather API key, Telegram token)
//! - A manual trigger for one notification tick
//!
//! # Example
//!
//! ```ignore
//! use weatherbot_api::{ApiConfig, AppState, serve};
//! use weatherbot_persistence::{SettingsStore, SubscriberStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(
//!         config.clone(),
//!         Arc::new(SubscriberStore::new("/path/to/data")),
//!         SettingsStore::new("/path/to/data"),
//!     );
//!
//!     serve(config, state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
