//! HTML pages. They carry no logic of their own; the browser fetches
//! everything from `/api/v1/rooms`.

use axum::{
    debug_handler,
    extract::{rejection::PathRejection, Path},
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Router,
};

use crate::{include_res, res, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/today", get(today))
        .route("/inspect", get(inspect))
        .route("/rooms", get(room_list))
        .route("/rooms/{room_id}", get(room_details))
        .route("/static/app.js", get(res::script))
}

#[debug_handler]
async fn home() -> Redirect {
    Redirect::to("/today")
}

#[debug_handler]
async fn today() -> Html<&'static str> {
    Html(include_res!(str, "/pages/today.html"))
}

#[debug_handler]
async fn inspect() -> Html<&'static str> {
    Html(include_res!(str, "/pages/inspect.html"))
}

#[debug_handler]
async fn room_list() -> Html<&'static str> {
    Html(include_res!(str, "/pages/room_list.html"))
}

#[debug_handler]
async fn room_details(
    room_id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, StatusCode> {
    let Ok(Path(room_id)) = room_id else {
        return Err(StatusCode::NOT_FOUND);
    };

    Ok(Html(
        include_res!(str, "/pages/room_details.html").replace("{id}", &room_id.to_string()),
    ))
}
