//! Subscriber admin handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::state::{parse_chat_id, AppState};
use crate::types::{
    LocationResponse, SuccessResponse, UserAction, UserDetailResponse, UserListResponse,
    UserSummary,
};

/// GET /admin/users - List all subscribers.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>> {
    let subscribers = state.subscribers.list()?;
    let users: Vec<UserSummary> = subscribers.iter().map(UserSummary::from).collect();
    let total = users.len();

    Ok(Json(UserListResponse { users, total }))
}

/// GET /admin/users/:chat_id - Get one subscriber.
pub async fn get_user(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<UserDetailResponse>> {
    let subscriber = state.subscriber(parse_chat_id(&chat_id)?)?;
    Ok(Json(UserDetailResponse::from(&subscriber)))
}

/// GET /admin/users/:chat_id/location - Get a subscriber's location.
pub async fn get_user_location(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<LocationResponse>> {
    let subscriber = state.subscriber(parse_chat_id(&chat_id)?)?;
    Ok(Json(LocationResponse {
        location: subscriber.location,
    }))
}

/// POST /admin/users/:chat_id/:action - Block, unblock or delete a subscriber.
///
/// Returns the subscriber as it was after the action (before removal for
/// `delete`).
pub async fn user_action(
    State(state): State<AppState>,
    Path((chat_id, action)): Path<(String, String)>,
) -> Result<Json<UserSummary>> {
    let chat_id = parse_chat_id(&chat_id)?;
    let action = UserAction::parse(&action)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid action: {}", action)))?;
    let subscriber = state.subscriber(chat_id)?;

    let updated = match action {
        UserAction::Block => state.subscribers.set_active(chat_id, false)?,
        UserAction::Unblock => state.subscribers.set_active(chat_id, true)?,
        UserAction::Delete => {
            state.subscribers.delete(chat_id)?;
            subscriber
        }
    };

    info!(chat_id = %chat_id, action = ?action, "Admin user action");
    Ok(Json(UserSummary::from(&updated)))
}

/// DELETE /admin/users/:chat_id - Delete a subscriber.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let chat_id = parse_chat_id(&chat_id)?;

    if !state.subscribers.delete(chat_id)? {
        return Err(ApiError::NotFound(format!(
            "user with chat id {} not found",
            chat_id
        )));
    }

    info!(chat_id = %chat_id, "Admin deleted user");
    Ok(Json(SuccessResponse::new("User deleted successfully")))
}
