use axum::{debug_handler, Json};

use crate::{
    store::{Room, RoomSession},
    AppResult, AppState,
};

#[debug_handler(state = AppState)]
pub(crate) async fn list_rooms(mut session: RoomSession) -> AppResult<Json<Vec<Room>>> {
    let rooms = session.all().await?;
    tracing::debug!(count = rooms.len(), "listed rooms");

    Ok(Json(rooms))
}
