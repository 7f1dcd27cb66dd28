//! Route definitions for member accounts and the session lifecycle.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::member;
use crate::state::AppState;

/// Member routes mounted at `/members`.
///
/// ```text
/// POST   /                -> register (public)
/// POST   /login           -> login (public)
/// POST   /logout          -> logout
/// GET    /me              -> own record
/// PATCH  /password        -> change password
/// PATCH  /nickname        -> change nickname
/// PATCH  /profile         -> change profile text
/// DELETE /                -> delete account
/// GET    /{id}/articles   -> member's articles (public)
/// GET    /{id}/comments   -> member's comments (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(member::register).delete(member::delete_account))
        .route("/login", post(member::login))
        .route("/logout", post(member::logout))
        .route("/me", get(member::me))
        .route("/password", patch(member::update_password))
        .route("/nickname", patch(member::update_nickname))
        .route("/profile", patch(member::update_profile))
        .route("/{id}/articles", get(member::member_articles))
        .route("/{id}/comments", get(member::member_comments))
}
