//! Repository for the `comments` table.

use sqlx::PgPool;
use teamup_core::types::DbId;

use crate::models::comment::{Comment, CommentMemberRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, member_id, article_id, content, created_at, updated_at";

/// Joined column list for comment + author queries.
const JOINED_COLUMNS: &str = "c.id, c.member_id, c.article_id, c.content, \
                              c.created_at, c.updated_at, m.nickname, m.profile";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        member_id: DbId,
        article_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (member_id, article_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(member_id)
            .bind(article_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all comments with author identity, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<CommentMemberRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             JOIN members m ON m.id = c.member_id
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, CommentMemberRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// List one article's comments with author identity, oldest first.
    pub async fn list_by_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<CommentMemberRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             JOIN members m ON m.id = c.member_id
             WHERE c.article_id = $1
             ORDER BY c.created_at"
        );
        sqlx::query_as::<_, CommentMemberRow>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// List all comments written by one member, newest first.
    pub async fn list_by_member(
        pool: &PgPool,
        member_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM comments WHERE member_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Comment>(&query)
            .bind(member_id)
            .fetch_all(pool)
            .await
    }

    /// Update a comment's content, returning the updated row.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET content = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
