//! Bot settings handlers.

use axum::{extract::State, Json};
use tracing::info;
use weatherbot_core::config::{env_non_blank, TELEGRAM_BOT_TOKEN_ENV, WEATHER_API_KEY_ENV};
use weatherbot_models::BotSettings;

use crate::error::Result;
use crate::state::AppState;
use crate::types::{SettingsResponse, SuccessResponse, UpdateSettingsRequest};

/// Placeholder for a value missing from both the store and the environment.
pub const NOT_SET: &str = "Not Set";

fn effective(stored: Option<&str>, env_name: &str) -> String {
    stored
        .map(str::to_string)
        .or_else(|| env_non_blank(env_name))
        .unwrap_or_else(|| NOT_SET.to_string())
}

/// GET /admin/settings - Effective settings: stored value, then env, then "Not Set".
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let stored = state.settings.load_or_default()?;

    Ok(Json(SettingsResponse {
        weather_api_key: effective(stored.weather_api_key(), WEATHER_API_KEY_ENV),
        telegram_bot_token: effective(stored.telegram_bot_token(), TELEGRAM_BOT_TOKEN_ENV),
    }))
}

/// PUT /admin/settings - Store new settings.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SuccessResponse>> {
    let current = state.settings.load_or_default()?;

    let updated = BotSettings::new(
        req.weather_api_key.unwrap_or(current.weather_api_key),
        req.telegram_bot_token.unwrap_or(current.telegram_bot_token),
    );
    state.settings.save(&updated)?;

    info!("Bot settings updated");
    Ok(Json(SuccessResponse::new("Settings updated successfully")))
}
