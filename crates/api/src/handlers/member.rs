//! Handlers for member accounts and the session lifecycle.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use teamup_core::types::DbId;
use teamup_db::repositories::{ArticleRepo, CommentRepo};

use crate::auth::session::{Credentials, NewMember};
use crate::handlers::article::articles_with_tags;
use crate::middleware::AuthMember;
use crate::state::AppState;
use crate::error::AppResult;

/// PATCH /api/v1/members/password request body.
#[derive(Debug, Deserialize)]
pub struct UpdatePassword {
    pub current_password: String,
    pub new_password: String,
}

/// PATCH /api/v1/members/nickname request body.
#[derive(Debug, Deserialize)]
pub struct UpdateNickname {
    pub nickname: String,
}

/// PATCH /api/v1/members/profile request body.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub profile: String,
}

/// POST /api/v1/members
///
/// Register a new member account. The member is logged in immediately: the
/// response carries a fresh access/refresh token pair.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<NewMember>,
) -> AppResult<impl IntoResponse> {
    let tokens = state.sessions.register(input).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/v1/members/login
///
/// Authenticate and receive an access/refresh token pair.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<impl IntoResponse> {
    let tokens = state.sessions.login(credentials).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/members/logout
///
/// Close the current session. Idempotent: repeating the logout with the
/// same access token succeeds, so this accepts any signed unexpired token
/// rather than a fully verified session.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let authorization = headers.get("authorization").and_then(|v| v.to_str().ok());
    state.sessions.logout_bearer(authorization).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/members/me
///
/// Retrieve the authenticated member's own record.
pub async fn me(member: AuthMember, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let me = state.sessions.member(member.member_id).await?;
    Ok(Json(me))
}

/// PATCH /api/v1/members/password
///
/// Change the member's password after re-verifying the current one.
pub async fn update_password(
    member: AuthMember,
    State(state): State<AppState>,
    Json(input): Json<UpdatePassword>,
) -> AppResult<impl IntoResponse> {
    state
        .sessions
        .update_password(member.member_id, &input.current_password, &input.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/members/nickname
///
/// Change the member's display nickname.
pub async fn update_nickname(
    member: AuthMember,
    State(state): State<AppState>,
    Json(input): Json<UpdateNickname>,
) -> AppResult<impl IntoResponse> {
    state
        .sessions
        .update_nickname(member.member_id, &input.nickname)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/members/profile
///
/// Change the member's profile text, returning the updated record.
pub async fn update_profile(
    member: AuthMember,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    let updated = state
        .sessions
        .update_profile(member.member_id, &input.profile)
        .await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/members
///
/// Delete the authenticated member's account and end the session.
pub async fn delete_account(
    member: AuthMember,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state.sessions.delete_account(member.member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/members/{id}/articles
///
/// List one member's articles with their tags, newest first.
pub async fn member_articles(
    State(state): State<AppState>,
    Path(member_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let articles = ArticleRepo::list_by_member(&state.pool, member_id).await?;
    let with_tags = articles_with_tags(&state.pool, articles).await?;
    Ok(Json(with_tags))
}

/// GET /api/v1/members/{id}/comments
///
/// List one member's comments, newest first.
pub async fn member_comments(
    State(state): State<AppState>,
    Path(member_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comments = CommentRepo::list_by_member(&state.pool, member_id).await?;
    Ok(Json(comments))
}
