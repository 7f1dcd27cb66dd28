//! Repository for the `stacks` table and the `stack_positions` join table.

use sqlx::PgPool;
use teamup_core::types::DbId;

use crate::models::position::Position;
use crate::models::stack::Stack;

/// Provides CRUD operations for tech-stack tags.
pub struct StackRepo;

impl StackRepo {
    /// Insert a new stack, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        profile: Option<&str>,
    ) -> Result<Stack, sqlx::Error> {
        sqlx::query_as::<_, Stack>(
            "INSERT INTO stacks (name, profile) VALUES ($1, $2)
             RETURNING id, name, profile",
        )
        .bind(name)
        .bind(profile)
        .fetch_one(pool)
        .await
    }

    /// Find a stack by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stack>, sqlx::Error> {
        sqlx::query_as::<_, Stack>("SELECT id, name, profile FROM stacks WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stacks by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Stack>, sqlx::Error> {
        sqlx::query_as::<_, Stack>("SELECT id, name, profile FROM stacks ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Replace a stack's position links with `position_ids`. Unknown ids are
    /// silently skipped.
    pub async fn set_positions(
        pool: &PgPool,
        stack_id: DbId,
        position_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM stack_positions WHERE stack_id = $1")
            .bind(stack_id)
            .execute(pool)
            .await?;

        sqlx::query(
            "INSERT INTO stack_positions (stack_id, position_id)
             SELECT $1, id FROM positions WHERE id = ANY($2)",
        )
        .bind(stack_id)
        .bind(position_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Load the positions linked to a stack.
    pub async fn positions_for(pool: &PgPool, stack_id: DbId) -> Result<Vec<Position>, sqlx::Error> {
        sqlx::query_as::<_, Position>(
            "SELECT p.id, p.name
             FROM stack_positions sp
             JOIN positions p ON p.id = sp.position_id
             WHERE sp.stack_id = $1
             ORDER BY p.name",
        )
        .bind(stack_id)
        .fetch_all(pool)
        .await
    }
}
