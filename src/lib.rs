pub mod appresult;
pub mod config;
pub mod pages;
pub mod res;
pub mod rooms;
pub mod store;
pub mod validate;

use axum::{
    debug_handler,
    extract::{FromRef, State},
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use appresult::{AppError, AppResult};
pub use config::Config;
pub use store::{NameCollation, Room, RoomStore};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: RoomStore,
}

/// Builds the full application: JSON API, HTML pages and health check.
pub fn app(store: RoomStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(rooms::router())
        .merge(pages::router())
        .with_state(AppState { store })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[debug_handler(state = AppState)]
async fn health(State(store): State<RoomStore>) -> AppResult<&'static str> {
    store.ping().await?;
    Ok("ok")
}
