//! Handlers for position tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use teamup_core::error::CoreError;
use teamup_core::types::DbId;
use teamup_db::models::position::{CreatePosition, PositionWithStacks};
use teamup_db::repositories::PositionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthMember;
use crate::state::AppState;

/// POST /api/v1/positions
///
/// Register a new position tag.
pub async fn create_position(
    member: AuthMember,
    State(state): State<AppState>,
    Json(input): Json<CreatePosition>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Position name must not be empty".into(),
        )));
    }

    let position = PositionRepo::create(&state.pool, input.name.trim()).await?;
    tracing::info!(
        position_id = position.id,
        member_id = member.member_id,
        "Position created"
    );
    Ok((StatusCode::CREATED, Json(position)))
}

/// GET /api/v1/positions
///
/// List all position tags by name.
pub async fn list_positions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let positions = PositionRepo::list(&state.pool).await?;
    Ok(Json(positions))
}

/// GET /api/v1/positions/{id}
///
/// Retrieve a position tag with its linked stacks.
pub async fn get_position(
    State(state): State<AppState>,
    Path(position_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let position = PositionRepo::find_by_id(&state.pool, position_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Position",
            id: position_id,
        }))?;

    let stacks = PositionRepo::stacks_for(&state.pool, position_id).await?;
    Ok(Json(PositionWithStacks { position, stacks }))
}
