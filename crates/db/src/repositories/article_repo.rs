//! Repository for the `articles` table and its tag join tables.

use sqlx::{FromRow, PgPool};
use teamup_core::types::DbId;

use crate::models::article::{Article, CreateArticle, UpdateArticle};
use crate::models::position::Position;
use crate::models::stack::Stack;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, member_id, title, content, category, recruit_count, \
                       proceed, period, due_date, contact, link, created_at, updated_at";

/// Stack tag row joined with its owning article id, for batch loading.
#[derive(Debug, FromRow)]
pub struct ArticleStackRow {
    pub article_id: DbId,
    pub id: DbId,
    pub name: String,
    pub profile: Option<String>,
}

/// Position tag row joined with its owning article id, for batch loading.
#[derive(Debug, FromRow)]
pub struct ArticlePositionRow {
    pub article_id: DbId,
    pub id: DbId,
    pub name: String,
}

/// Provides CRUD operations for articles and their tag associations.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row. Tag associations are
    /// written separately via [`ArticleRepo::set_stacks`] / [`ArticleRepo::set_positions`].
    pub async fn create(
        pool: &PgPool,
        member_id: DbId,
        input: &CreateArticle,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles
                (member_id, title, content, category, recruit_count, proceed, period, due_date, contact, link)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(member_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.recruit_count)
            .bind(&input.proceed)
            .bind(input.period)
            .bind(input.due_date)
            .bind(&input.contact)
            .bind(&input.link)
            .fetch_one(pool)
            .await
    }

    /// Find an article by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all articles, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles ORDER BY created_at DESC");
        sqlx::query_as::<_, Article>(&query).fetch_all(pool).await
    }

    /// List all articles written by one member, newest first.
    pub async fn list_by_member(pool: &PgPool, member_id: DbId) -> Result<Vec<Article>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM articles WHERE member_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Article>(&query)
            .bind(member_id)
            .fetch_all(pool)
            .await
    }

    /// Update an article. Only non-`None` scalar fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                recruit_count = COALESCE($5, recruit_count),
                proceed = COALESCE($6, proceed),
                period = COALESCE($7, period),
                due_date = COALESCE($8, due_date),
                contact = COALESCE($9, contact),
                link = COALESCE($10, link),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.recruit_count)
            .bind(&input.proceed)
            .bind(input.period)
            .bind(input.due_date)
            .bind(&input.contact)
            .bind(&input.link)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article. Comments and tag links cascade via foreign keys.
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace an article's stack links with `stack_ids`.
    ///
    /// Ids that do not match an existing stack are silently skipped: the
    /// insert selects from `stacks`, so only live tags are linked.
    pub async fn set_stacks(
        pool: &PgPool,
        article_id: DbId,
        stack_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM article_stacks WHERE article_id = $1")
            .bind(article_id)
            .execute(pool)
            .await?;

        sqlx::query(
            "INSERT INTO article_stacks (article_id, stack_id)
             SELECT $1, id FROM stacks WHERE id = ANY($2)",
        )
        .bind(article_id)
        .bind(stack_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Replace an article's position links with `position_ids`. Unknown ids
    /// are skipped, as with [`ArticleRepo::set_stacks`].
    pub async fn set_positions(
        pool: &PgPool,
        article_id: DbId,
        position_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM article_positions WHERE article_id = $1")
            .bind(article_id)
            .execute(pool)
            .await?;

        sqlx::query(
            "INSERT INTO article_positions (article_id, position_id)
             SELECT $1, id FROM positions WHERE id = ANY($2)",
        )
        .bind(article_id)
        .bind(position_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Batch-load stack tags for a set of articles.
    pub async fn stacks_for(
        pool: &PgPool,
        article_ids: &[DbId],
    ) -> Result<Vec<ArticleStackRow>, sqlx::Error> {
        sqlx::query_as::<_, ArticleStackRow>(
            "SELECT ast.article_id, s.id, s.name, s.profile
             FROM article_stacks ast
             JOIN stacks s ON s.id = ast.stack_id
             WHERE ast.article_id = ANY($1)
             ORDER BY s.name",
        )
        .bind(article_ids)
        .fetch_all(pool)
        .await
    }

    /// Batch-load position tags for a set of articles.
    pub async fn positions_for(
        pool: &PgPool,
        article_ids: &[DbId],
    ) -> Result<Vec<ArticlePositionRow>, sqlx::Error> {
        sqlx::query_as::<_, ArticlePositionRow>(
            "SELECT ap.article_id, p.id, p.name
             FROM article_positions ap
             JOIN positions p ON p.id = ap.position_id
             WHERE ap.article_id = ANY($1)
             ORDER BY p.name",
        )
        .bind(article_ids)
        .fetch_all(pool)
        .await
    }
}

impl ArticleStackRow {
    pub fn into_stack(self) -> Stack {
        Stack {
            id: self.id,
            name: self.name,
            profile: self.profile,
        }
    }
}

impl ArticlePositionRow {
    pub fn into_position(self) -> Position {
        Position {
            id: self.id,
            name: self.name,
        }
    }
}
