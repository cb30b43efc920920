use axum::{debug_handler, http::StatusCode};
use serde::Deserialize;

use crate::{store::RoomSession, validate::RoomName, AppError, AppResult, AppState};

use super::{AppJson, AppPath};

/// Every field is optional; an absent (or null) field is left as is.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateRoomRequest {
    #[serde(default)]
    name: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn update_room(
    AppPath(room_id): AppPath<i64>,
    mut session: RoomSession,
    AppJson(UpdateRoomRequest { name }): AppJson<UpdateRoomRequest>,
) -> AppResult<StatusCode> {
    if session.get(room_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let Some(name) = name else {
        return Ok(StatusCode::NO_CONTENT);
    };
    let name = RoomName::parse(name)?;

    // The row can vanish between the lookup and the write.
    if !session.update_name(room_id, &name).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(room_id, name = %name, "renamed room");

    Ok(StatusCode::NO_CONTENT)
}
