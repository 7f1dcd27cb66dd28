//! Session-verified authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use teamup_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated member extracted from a Bearer access token in the
/// `Authorization` header.
///
/// Unlike a pure JWT check, this runs the full session verification: token
/// signature and expiry, member existence, and the post-logout dead-zone
/// deny-list. Use it as an extractor parameter in any handler that requires
/// a live session:
///
/// ```ignore
/// async fn my_handler(member: AuthMember) -> AppResult<Json<()>> {
///     tracing::info!(member_id = member.member_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthMember {
    /// The member's internal database id.
    pub member_id: DbId,
}

impl FromRequestParts<AppState> for AuthMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok());

        let member_id = state.sessions.verify_access(auth_header).await?;

        Ok(AuthMember { member_id })
    }
}
