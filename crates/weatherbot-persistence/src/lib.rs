//! Persistence layer for the weather bot.
//!
//! Subscribers and settings are stored as JSON files and every write goes
//! through a temp file followed by a rename, so a crash never leaves a
//! half-written record behind.
//!
//! # Example
//!
//! ```no_run
//! use weatherbot_persistence::SubscriberStore;
//! use weatherbot_models::{ChatId, Subscriber};
//!
//! let store = SubscriberStore::new("/home/user/.weatherbot/data");
//!
//! let subscriber = Subscriber::new(42, "Ann").with_location("London");
//! store.save(&subscriber).unwrap();
//!
//! let loaded = store.load(ChatId(42)).unwrap();
//! assert_eq!(loaded.name, "Ann");
//! ```

pub mod atomic;
pub mod error;
pub mod settings_store;
pub mod subscriber_store;

pub use error::{PersistenceError, Result};
pub use settings_store::SettingsStore;
pub use subscriber_store::{SubscriberStore, Upsert};
