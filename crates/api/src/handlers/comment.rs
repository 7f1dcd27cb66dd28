//! Handlers for article comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use teamup_core::error::CoreError;
use teamup_core::types::DbId;
use teamup_db::models::comment::{Comment, CommentResponse, CreateComment};
use teamup_db::repositories::{ArticleRepo, CommentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthMember;
use crate::state::AppState;

/// PATCH /api/v1/comments/{id} request body.
#[derive(Debug, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}

/// POST /api/v1/comments
///
/// Add a comment to an article as the authenticated member.
pub async fn create_comment(
    member: AuthMember,
    State(state): State<AppState>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }

    // The comment FK would catch this too, but a missing article is a client
    // error, not a database one.
    if ArticleRepo::find_by_id(&state.pool, input.article_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id: input.article_id,
        }));
    }

    let comment =
        CommentRepo::create(&state.pool, member.member_id, input.article_id, &input.content)
            .await?;

    tracing::info!(
        comment_id = comment.id,
        article_id = input.article_id,
        member_id = member.member_id,
        "Comment created"
    );
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/comments
///
/// List all comments with author identity, newest first.
pub async fn list_comments(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let comments: Vec<CommentResponse> = CommentRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(comments))
}

/// PATCH /api/v1/comments/{id}
///
/// Edit a comment's content. Only the author may edit.
pub async fn update_comment(
    member: AuthMember,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<impl IntoResponse> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }

    let existing = find_comment(&state.pool, comment_id).await?;
    require_author(&existing, member.member_id)?;

    let updated = CommentRepo::update_content(&state.pool, comment_id, &input.content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/comments/{id}
///
/// Delete a comment. Only the author may delete.
pub async fn delete_comment(
    member: AuthMember,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_comment(&state.pool, comment_id).await?;
    require_author(&existing, member.member_id)?;

    CommentRepo::delete(&state.pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_comment(pool: &teamup_db::DbPool, comment_id: DbId) -> Result<Comment, AppError> {
    CommentRepo::find_by_id(pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))
}

fn require_author(comment: &Comment, member_id: DbId) -> Result<(), AppError> {
    if comment.member_id != member_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may modify this comment".into(),
        )));
    }
    Ok(())
}
