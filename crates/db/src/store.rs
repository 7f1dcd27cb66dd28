//! Member persistence contract consumed by the session lifecycle.
//!
//! The lifecycle never touches the pool directly; it is handed a
//! `dyn MemberStore` at startup so the Postgres-backed implementation can be
//! swapped for an in-memory one in tests.

use async_trait::async_trait;
use teamup_core::types::DbId;

use crate::models::member::{CreateMember, Member};
use crate::repositories::MemberRepo;
use crate::DbPool;

/// Create / find-by-unique-field / find-by-id / update / delete operations
/// over the member record, as required by the session lifecycle.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn create(&self, input: &CreateMember) -> Result<Member, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Member>, sqlx::Error>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, sqlx::Error>;

    /// Returns `true` if the row was updated.
    async fn update_password(&self, id: DbId, password_hash: &str) -> Result<bool, sqlx::Error>;

    /// Returns `true` if the row was updated.
    async fn update_nickname(&self, id: DbId, nickname: &str) -> Result<bool, sqlx::Error>;

    /// Returns the updated row, or `None` if no such member exists.
    async fn update_profile(&self, id: DbId, profile: &str) -> Result<Option<Member>, sqlx::Error>;

    /// Returns `true` if the row was deleted.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// Postgres-backed [`MemberStore`] delegating to [`MemberRepo`].
#[derive(Clone)]
pub struct PgMemberStore {
    pool: DbPool,
}

impl PgMemberStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn create(&self, input: &CreateMember) -> Result<Member, sqlx::Error> {
        MemberRepo::create(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        MemberRepo::find_by_id(&self.pool, id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, sqlx::Error> {
        MemberRepo::find_by_username(&self.pool, username).await
    }

    async fn update_password(&self, id: DbId, password_hash: &str) -> Result<bool, sqlx::Error> {
        MemberRepo::update_password(&self.pool, id, password_hash).await
    }

    async fn update_nickname(&self, id: DbId, nickname: &str) -> Result<bool, sqlx::Error> {
        MemberRepo::update_nickname(&self.pool, id, nickname).await
    }

    async fn update_profile(&self, id: DbId, profile: &str) -> Result<Option<Member>, sqlx::Error> {
        MemberRepo::update_profile(&self.pool, id, profile).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        MemberRepo::delete(&self.pool, id).await
    }
}
