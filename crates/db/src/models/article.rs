//! Recruitment-article model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamup_core::types::{DbId, Timestamp};

use crate::models::comment::CommentResponse;
use crate::models::position::Position;
use crate::models::stack::Stack;

/// Full article row from the `articles` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Article {
    pub id: DbId,
    pub member_id: DbId,
    pub title: String,
    pub content: String,
    /// One of `study` | `project`.
    pub category: String,
    pub recruit_count: Option<i32>,
    /// One of `online` | `offline`.
    pub proceed: String,
    /// Expected duration in weeks.
    pub period: Option<i32>,
    pub due_date: Timestamp,
    /// One of `kakao` | `email` | `google`.
    pub contact: String,
    pub link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Article plus its stack/position tags, as returned by list endpoints.
#[derive(Debug, Serialize)]
pub struct ArticleWithTags {
    #[serde(flatten)]
    pub article: Article,
    pub stacks: Vec<Stack>,
    pub positions: Vec<Position>,
}

/// Article detail view: tags plus the comment thread.
#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub stacks: Vec<Stack>,
    pub positions: Vec<Position>,
    pub comments: Vec<CommentResponse>,
}

/// DTO for creating an article. `stacks` and `positions` hold tag ids;
/// unknown ids are skipped rather than rejected.
#[derive(Debug, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub recruit_count: Option<i32>,
    pub proceed: String,
    pub period: Option<i32>,
    pub due_date: Timestamp,
    pub contact: String,
    pub link: String,
    #[serde(default)]
    pub stacks: Vec<DbId>,
    #[serde(default)]
    pub positions: Vec<DbId>,
}

/// DTO for updating an article. Only non-`None` fields are applied; `stacks`
/// and `positions`, when present, replace the article's tag sets wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub recruit_count: Option<i32>,
    pub proceed: Option<String>,
    pub period: Option<i32>,
    pub due_date: Option<Timestamp>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub stacks: Option<Vec<DbId>>,
    pub positions: Option<Vec<DbId>>,
}
