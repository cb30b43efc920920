use axum::{debug_handler, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    store::{Room, RoomSession},
    validate::RoomName,
    AppResult, AppState,
};

use super::AppJson;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateRoomRequest {
    name: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn new_room(
    mut session: RoomSession,
    AppJson(CreateRoomRequest { name }): AppJson<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<Room>)> {
    let name = RoomName::parse(name)?;
    let room = session.insert(&name).await?;
    tracing::info!(room_id = room.id, name = %room.name, "created room");

    Ok((StatusCode::CREATED, Json(room)))
}
