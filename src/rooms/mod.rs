mod delete;
mod list;
mod new;
mod room;
mod update;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::get,
    Router,
};

use crate::{AppError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/rooms", get(list::list_rooms).post(new::new_room))
        .route(
            "/api/v1/rooms/{room_id}",
            get(room::room)
                .patch(update::update_room)
                .delete(delete::delete_room),
        )
}

/// JSON body whose rejections surface as 422 validation errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters whose rejections surface as 422 validation errors.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
