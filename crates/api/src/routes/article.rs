//! Route definitions for recruitment articles.

use axum::routing::get;
use axum::Router;

use crate::handlers::article;
use crate::state::AppState;

/// Article routes mounted at `/articles`.
///
/// ```text
/// GET    /       -> list_articles (public)
/// POST   /       -> create_article
/// GET    /{id}   -> get_article (public)
/// PUT    /{id}   -> update_article (author only)
/// DELETE /{id}   -> delete_article (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(article::list_articles).post(article::create_article),
        )
        .route(
            "/{id}",
            get(article::get_article)
                .put(article::update_article)
                .delete(article::delete_article),
        )
}
