//! Request DTOs for the API.

use serde::Deserialize;

/// Update settings request. A missing field keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub weather_api_key: Option<String>,
    pub telegram_bot_token: Option<String>,
}

/// Actions accepted by `POST /admin/users/:chat_id/:action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Block,
    Unblock,
    Delete,
}

impl UserAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "block" => Some(UserAction::Block),
            "unblock" => Some(UserAction::Unblock),
            "delete" => Some(UserAction::Delete),
            _ => None,
        }
    }
}
