//! Repository for the `positions` table.

use sqlx::PgPool;
use teamup_core::types::DbId;

use crate::models::position::Position;
use crate::models::stack::Stack;

/// Provides CRUD operations for position tags.
pub struct PositionRepo;

impl PositionRepo {
    /// Insert a new position, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Position, sqlx::Error> {
        sqlx::query_as::<_, Position>(
            "INSERT INTO positions (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Find a position by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Position>, sqlx::Error> {
        sqlx::query_as::<_, Position>("SELECT id, name FROM positions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all positions by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Position>, sqlx::Error> {
        sqlx::query_as::<_, Position>("SELECT id, name FROM positions ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Load the stacks linked to a position.
    pub async fn stacks_for(pool: &PgPool, position_id: DbId) -> Result<Vec<Stack>, sqlx::Error> {
        sqlx::query_as::<_, Stack>(
            "SELECT s.id, s.name, s.profile
             FROM stack_positions sp
             JOIN stacks s ON s.id = sp.stack_id
             WHERE sp.position_id = $1
             ORDER BY s.name",
        )
        .bind(position_id)
        .fetch_all(pool)
        .await
    }
}
