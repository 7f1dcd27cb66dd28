//! Tech-stack tag model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamup_core::types::DbId;

/// Stack row from the `stacks` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Stack {
    pub id: DbId,
    pub name: String,
    /// Reference to the stack's icon image, if any.
    pub profile: Option<String>,
}

/// Stack with its linked positions, for the detail endpoint.
#[derive(Debug, Serialize)]
pub struct StackWithPositions {
    #[serde(flatten)]
    pub stack: Stack,
    pub positions: Vec<crate::models::position::Position>,
}

/// DTO for creating a stack. `positions` holds position ids to link;
/// unknown ids are skipped.
#[derive(Debug, Deserialize)]
pub struct CreateStack {
    pub name: String,
    pub profile: Option<String>,
    #[serde(default)]
    pub positions: Vec<DbId>,
}
