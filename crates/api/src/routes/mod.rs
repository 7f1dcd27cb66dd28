pub mod article;
pub mod comment;
pub mod health;
pub mod member;
pub mod position;
pub mod stack;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /members                     register, delete account
/// /members/login               login (public)
/// /members/logout              logout
/// /members/me                  own record
/// /members/password            change password (PATCH)
/// /members/nickname            change nickname (PATCH)
/// /members/profile             change profile (PATCH)
/// /members/{id}/articles       member's articles (public)
/// /members/{id}/comments       member's comments (public)
///
/// /articles                    list (public), create
/// /articles/{id}               get (public), update, delete (author only)
///
/// /comments                    list (public), create
/// /comments/{id}               update, delete (author only)
///
/// /stacks                      list (public), create
/// /stacks/{id}                 get (public)
///
/// /positions                   list (public), create
/// /positions/{id}              get (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/members", member::router())
        .nest("/articles", article::router())
        .nest("/comments", comment::router())
        .nest("/stacks", stack::router())
        .nest("/positions", position::router())
}
