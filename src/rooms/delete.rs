use axum::{debug_handler, http::StatusCode};

use crate::{store::RoomSession, AppError, AppResult, AppState};

use super::AppPath;

#[debug_handler(state = AppState)]
pub(crate) async fn delete_room(
    AppPath(room_id): AppPath<i64>,
    mut session: RoomSession,
) -> AppResult<StatusCode> {
    if !session.delete(room_id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(room_id, "deleted room");

    Ok(StatusCode::NO_CONTENT)
}
