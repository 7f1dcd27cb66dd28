//! Handlers for tech-stack tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use teamup_core::error::CoreError;
use teamup_core::types::DbId;
use teamup_db::models::stack::{CreateStack, StackWithPositions};
use teamup_db::repositories::StackRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthMember;
use crate::state::AppState;

/// POST /api/v1/stacks
///
/// Register a new stack tag, optionally linked to position tags.
pub async fn create_stack(
    member: AuthMember,
    State(state): State<AppState>,
    Json(input): Json<CreateStack>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Stack name must not be empty".into(),
        )));
    }

    let stack = StackRepo::create(&state.pool, input.name.trim(), input.profile.as_deref()).await?;
    StackRepo::set_positions(&state.pool, stack.id, &input.positions).await?;
    let positions = StackRepo::positions_for(&state.pool, stack.id).await?;

    tracing::info!(stack_id = stack.id, member_id = member.member_id, "Stack created");
    Ok((
        StatusCode::CREATED,
        Json(StackWithPositions { stack, positions }),
    ))
}

/// GET /api/v1/stacks
///
/// List all stack tags by name.
pub async fn list_stacks(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stacks = StackRepo::list(&state.pool).await?;
    Ok(Json(stacks))
}

/// GET /api/v1/stacks/{id}
///
/// Retrieve a stack tag with its linked positions.
pub async fn get_stack(
    State(state): State<AppState>,
    Path(stack_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stack = StackRepo::find_by_id(&state.pool, stack_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Stack",
            id: stack_id,
        }))?;

    let positions = StackRepo::positions_for(&state.pool, stack_id).await?;
    Ok(Json(StackWithPositions { stack, positions }))
}
