//! Shared configuration for the weather bot.
//!
//! Every binary and service crate locates its state through [`config`] so
//! the bot, the scheduler and the admin API agree on where data lives.

pub mod config;

pub use config::{env_non_blank, load_env_files};
