pub mod api;
pub mod dashboard;
pub mod public;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(public::router())
        .merge(dashboard::router())
        .nest("/api", api::router())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}
