use axum::{debug_handler, Json};

use crate::{
    store::{Room, RoomSession},
    AppError, AppResult, AppState,
};

use super::AppPath;

#[debug_handler(state = AppState)]
pub(crate) async fn room(
    AppPath(room_id): AppPath<i64>,
    mut session: RoomSession,
) -> AppResult<Json<Room>> {
    let Some(room) = session.get(room_id).await? else {
        return Err(AppError::NotFound);
    };

    Ok(Json(room))
}
