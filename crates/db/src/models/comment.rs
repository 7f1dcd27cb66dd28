//! Comment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamup_core::types::{DbId, Timestamp};

use crate::models::member::MemberBrief;

/// Full comment row from the `comments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub member_id: DbId,
    pub article_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat comment + author row produced by the member join.
#[derive(Debug, Clone, FromRow)]
pub struct CommentMemberRow {
    pub id: DbId,
    pub member_id: DbId,
    pub article_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub nickname: String,
    pub profile: Option<String>,
}

/// Comment with its author's public identity, for API responses.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: DbId,
    pub article_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub member: MemberBrief,
}

impl From<CommentMemberRow> for CommentResponse {
    fn from(row: CommentMemberRow) -> Self {
        Self {
            id: row.id,
            article_id: row.article_id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
            member: MemberBrief {
                id: row.member_id,
                nickname: row.nickname,
                profile: row.profile,
            },
        }
    }
}

/// DTO for creating a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub article_id: DbId,
    pub content: String,
}
