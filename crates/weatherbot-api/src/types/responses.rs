//! Response DTOs for the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use weatherbot_models::Subscriber;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Full subscriber record for list responses.
///
/// Chat ids are rendered as strings since they can exceed the safe integer
/// range of JavaScript clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub chat_id: String,
    pub name: String,
    pub location: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub subscribed_at: DateTime<Utc>,
}

impl From<&Subscriber> for UserSummary {
    fn from(sub: &Subscriber) -> Self {
        Self {
            id: sub.id.as_str().to_string(),
            chat_id: sub.chat_id.to_string(),
            name: sub.name.clone(),
            location: sub.location.clone(),
            is_active: sub.is_active,
            is_admin: sub.is_admin,
            subscribed_at: sub.subscribed_at,
        }
    }
}

/// User list response.
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    pub total: usize,
}

/// Single user response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub chat_id: String,
    pub name: String,
    pub location: Option<String>,
    pub is_active: bool,
}

impl From<&Subscriber> for UserDetailResponse {
    fn from(sub: &Subscriber) -> Self {
        Self {
            chat_id: sub.chat_id.to_string(),
            name: sub.name.clone(),
            location: sub.location.clone(),
            is_active: sub.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub location: Option<String>,
}

/// Generic success response.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Effective bot settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub weather_api_key: String,
    pub telegram_bot_token: String,
}
