//! Member entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use teamup_core::types::{DbId, Timestamp};

/// Full member row from the `members` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`MemberResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Member {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub birth: NaiveDate,
    pub profile: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe member representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: DbId,
    pub username: String,
    pub nickname: String,
    pub birth: NaiveDate,
    pub profile: Option<String>,
    pub created_at: Timestamp,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            username: member.username,
            nickname: member.nickname,
            birth: member.birth,
            profile: member.profile,
            created_at: member.created_at,
        }
    }
}

/// Minimal member identity embedded in comment listings.
#[derive(Debug, Clone, Serialize)]
pub struct MemberBrief {
    pub id: DbId,
    pub nickname: String,
    pub profile: Option<String>,
}

/// DTO for inserting a new member. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub birth: NaiveDate,
}
