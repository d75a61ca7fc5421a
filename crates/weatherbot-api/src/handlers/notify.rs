//! Manual notification trigger.

use axum::{extract::State, Json};
use tracing::info;
use weatherbot_notify::TickSummary;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// POST /admin/notify - Run one notification tick now.
pub async fn trigger_notify(State(state): State<AppState>) -> Result<Json<TickSummary>> {
    let pipeline = state
        .pipeline
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("notification pipeline not running".to_string()))?;

    info!("Manual weather tick requested");
    let report = pipeline.run_tick().await?;
    Ok(Json(report.summary()))
}
