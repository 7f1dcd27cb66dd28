//! Route definitions for tech-stack tags.

use axum::routing::get;
use axum::Router;

use crate::handlers::stack;
use crate::state::AppState;

/// Stack routes mounted at `/stacks`.
///
/// ```text
/// GET  /       -> list_stacks (public)
/// POST /       -> create_stack
/// GET  /{id}   -> get_stack (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stack::list_stacks).post(stack::create_stack))
        .route("/{id}", get(stack::get_stack))
}
