//! Handlers for recruitment articles and their tag associations.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use teamup_core::article::{validate_category, validate_contact, validate_proceed};
use teamup_core::error::CoreError;
use teamup_core::types::DbId;
use teamup_db::models::article::{
    Article, ArticleDetail, ArticleWithTags, CreateArticle, UpdateArticle,
};
use teamup_db::repositories::{ArticleRepo, CommentRepo};
use teamup_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthMember;
use crate::state::AppState;

/// POST /api/v1/articles
///
/// Create an article owned by the authenticated member.
pub async fn create_article(
    member: AuthMember,
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    validate_category(&input.category)?;
    validate_proceed(&input.proceed)?;
    validate_contact(&input.contact)?;

    let article = ArticleRepo::create(&state.pool, member.member_id, &input).await?;
    ArticleRepo::set_stacks(&state.pool, article.id, &input.stacks).await?;
    ArticleRepo::set_positions(&state.pool, article.id, &input.positions).await?;

    tracing::info!(article_id = article.id, member_id = member.member_id, "Article created");

    let mut with_tags = articles_with_tags(&state.pool, vec![article]).await?;
    let created = with_tags.remove(0);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/articles
///
/// List all articles with their tags, newest first.
pub async fn list_articles(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let articles = ArticleRepo::list(&state.pool).await?;
    let with_tags = articles_with_tags(&state.pool, articles).await?;
    Ok(Json(with_tags))
}

/// GET /api/v1/articles/{id}
///
/// Retrieve an article with its tags and comment thread.
pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state.pool, article_id).await?;

    let mut with_tags = articles_with_tags(&state.pool, vec![article]).await?;
    let tagged = with_tags.remove(0);

    let comments = CommentRepo::list_by_article(&state.pool, article_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ArticleDetail {
        article: tagged.article,
        stacks: tagged.stacks,
        positions: tagged.positions,
        comments,
    }))
}

/// PUT /api/v1/articles/{id}
///
/// Update an article. Only the author may update; omitted fields are left
/// unchanged, and a present `stacks`/`positions` list replaces the tag set.
pub async fn update_article(
    member: AuthMember,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    let existing = find_article(&state.pool, article_id).await?;
    require_author(&existing, member.member_id)?;

    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    if let Some(proceed) = &input.proceed {
        validate_proceed(proceed)?;
    }
    if let Some(contact) = &input.contact {
        validate_contact(contact)?;
    }

    let updated = ArticleRepo::update(&state.pool, article_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id: article_id,
        }))?;

    if let Some(stacks) = &input.stacks {
        ArticleRepo::set_stacks(&state.pool, article_id, stacks).await?;
    }
    if let Some(positions) = &input.positions {
        ArticleRepo::set_positions(&state.pool, article_id, positions).await?;
    }

    let mut with_tags = articles_with_tags(&state.pool, vec![updated]).await?;
    Ok(Json(with_tags.remove(0)))
}

/// DELETE /api/v1/articles/{id}
///
/// Delete an article. Only the author may delete; comments and tag links
/// cascade.
pub async fn delete_article(
    member: AuthMember,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_article(&state.pool, article_id).await?;
    require_author(&existing, member.member_id)?;

    ArticleRepo::delete(&state.pool, article_id).await?;
    tracing::info!(article_id, member_id = member.member_id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Attach stack and position tags to a batch of articles with two queries.
pub(crate) async fn articles_with_tags(
    pool: &DbPool,
    articles: Vec<Article>,
) -> Result<Vec<ArticleWithTags>, sqlx::Error> {
    let ids: Vec<DbId> = articles.iter().map(|a| a.id).collect();

    let mut stacks_by_article: HashMap<DbId, Vec<_>> = HashMap::new();
    for row in ArticleRepo::stacks_for(pool, &ids).await? {
        stacks_by_article
            .entry(row.article_id)
            .or_default()
            .push(row.into_stack());
    }

    let mut positions_by_article: HashMap<DbId, Vec<_>> = HashMap::new();
    for row in ArticleRepo::positions_for(pool, &ids).await? {
        positions_by_article
            .entry(row.article_id)
            .or_default()
            .push(row.into_position());
    }

    Ok(articles
        .into_iter()
        .map(|article| {
            let stacks = stacks_by_article.remove(&article.id).unwrap_or_default();
            let positions = positions_by_article.remove(&article.id).unwrap_or_default();
            ArticleWithTags {
                article,
                stacks,
                positions,
            }
        })
        .collect())
}

async fn find_article(pool: &DbPool, article_id: DbId) -> Result<Article, AppError> {
    ArticleRepo::find_by_id(pool, article_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id: article_id,
        }))
}

fn require_author(article: &Article, member_id: DbId) -> Result<(), AppError> {
    if article.member_id != member_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may modify this article".into(),
        )));
    }
    Ok(())
}
