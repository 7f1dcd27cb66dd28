//! Position tag model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamup_core::types::DbId;

/// Position row from the `positions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Position {
    pub id: DbId,
    pub name: String,
}

/// Position with its linked stacks, for the detail endpoint.
#[derive(Debug, Serialize)]
pub struct PositionWithStacks {
    #[serde(flatten)]
    pub position: Position,
    pub stacks: Vec<crate::models::stack::Stack>,
}

/// DTO for creating a position.
#[derive(Debug, Deserialize)]
pub struct CreatePosition {
    pub name: String,
}
