use axum::{
    debug_handler,
    http::header,
    response::IntoResponse,
};

#[macro_export]
macro_rules! include_res {
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

#[debug_handler]
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        include_res!(str, "/static/app.js"),
    )
}
