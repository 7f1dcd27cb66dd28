//! Repository for the `members` table.

use sqlx::PgPool;
use teamup_core::types::DbId;

use crate::models::member::{CreateMember, Member};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, password_hash, nickname, birth, profile, created_at, updated_at";

/// Provides CRUD operations for members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (username, password_hash, nickname, birth)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.nickname)
            .bind(input.birth)
            .fetch_one(pool)
            .await
    }

    /// Find a member by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a member by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE username = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Update a member's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE members SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a member's nickname. Returns `true` if the row was updated.
    pub async fn update_nickname(
        pool: &PgPool,
        id: DbId,
        nickname: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE members SET nickname = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(nickname)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a member's profile-image reference, returning the updated row.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        profile: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET profile = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(profile)
            .fetch_optional(pool)
            .await
    }

    /// Delete a member. Articles and comments cascade via foreign keys.
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
