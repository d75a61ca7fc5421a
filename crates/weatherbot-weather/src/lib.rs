//! Realtime weather lookups against the Tomorrow.io API.
//!
//! [`TomorrowClient::realtime`] turns a free-form location ("London",
//! "40.7,-74.0") into a [`WeatherSnapshot`](weatherbot_models::WeatherSnapshot).
//! The API key is resolved on every request through an [`ApiKeySource`], so
//! a key changed from the admin API takes effect without a restart.

pub mod client;
pub mod error;
pub mod key;
pub mod response;

pub use client::{TomorrowClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ProviderError, Result};
pub use key::ApiKeySource;
