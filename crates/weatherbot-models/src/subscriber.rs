//! Subscriber records.
//!
//! A subscriber is a chat user with a stored location and an active flag.
//! Inactive subscribers are "blocked": they receive no scheduled updates and
//! the bot refuses their commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChatId, SubscriberId};

/// A chat user subscribed to weather updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Unique identifier for the record.
    pub id: SubscriberId,

    /// Telegram chat the updates are delivered to. Unique per store.
    pub chat_id: ChatId,

    /// Display name (the user's first name).
    pub name: String,

    /// Location updates are resolved for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Whether the subscriber receives updates.
    pub is_active: bool,

    /// Whether the subscriber is a bot administrator.
    #[serde(default)]
    pub is_admin: bool,

    /// When the subscriber first contacted the bot.
    pub subscribed_at: DateTime<Utc>,
}

impl Subscriber {
    /// Creates a new active subscriber without a location.
    pub fn new(chat_id: impl Into<ChatId>, name: impl Into<String>) -> Self {
        Self {
            id: SubscriberId::new(),
            chat_id: chat_id.into(),
            name: name.into(),
            location: None,
            is_active: true,
            is_admin: false,
            subscribed_at: Utc::now(),
        }
    }

    /// Sets the location (builder style).
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the active flag (builder style).
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Returns the location if it is present and not blank.
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Returns true if the subscriber should receive scheduled updates.
    pub fn is_eligible(&self) -> bool {
        self.is_active && self.location().is_some()
    }

    /// Returns true if the subscriber has been blocked.
    pub fn is_blocked(&self) -> bool {
        !self.is_active
    }

    /// Updates the location.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Deactivates the subscriber.
    pub fn block(&mut self) {
        self.is_active = false;
    }

    /// Reactivates the subscriber.
    pub fn unblock(&mut self) {
        self.is_active = true;
    }
}

/// Projection of an active subscriber handed to the notification pipeline.
///
/// `location` is passed through as stored; the pipeline decides whether a
/// blank location is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleSubscriber {
    pub chat_id: ChatId,
    pub location: Option<String>,
}

impl From<&Subscriber> for EligibleSubscriber {
    fn from(subscriber: &Subscriber) -> Self {
        Self {
            chat_id: subscriber.chat_id,
            location: subscriber.location.clone(),
        }
    }
}
