//! Route definitions for position tags.

use axum::routing::get;
use axum::Router;

use crate::handlers::position;
use crate::state::AppState;

/// Position routes mounted at `/positions`.
///
/// ```text
/// GET  /       -> list_positions (public)
/// POST /       -> create_position
/// GET  /{id}   -> get_position (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(position::list_positions).post(position::create_position),
        )
        .route("/{id}", get(position::get_position))
}
