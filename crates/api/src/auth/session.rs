//! The session lifecycle: register, login, logout, access verification, and
//! credential/profile updates.
//!
//! All storage access goes through the [`MemberStore`] and [`SessionCache`]
//! traits so the lifecycle is testable without Postgres or Redis. The cache
//! holds two keys per member:
//!
//! - `session:<id>` -- the member's current refresh token, overwritten on
//!   every login so at most one refresh token is live per member.
//! - `deadzone:<id>` -- a deny-list marker written on logout with a TTL that
//!   covers the access-token lifetime. While it exists, otherwise-valid
//!   access tokens for that member are refused.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use teamup_cache::{deadzone_key, session_key, CacheError, SessionCache};
use teamup_core::birthdate::BirthInput;
use teamup_core::error::CoreError;
use teamup_core::types::DbId;
use teamup_db::models::member::{CreateMember, Member, MemberResponse};
use teamup_db::store::MemberStore;

use super::jwt::{self, TokenError};
use super::{password, AuthConfig};

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct NewMember {
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub birth: BirthInput,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful register/login response: the member's identity plus a fresh
/// token pair.
#[derive(Debug, Serialize)]
pub struct SessionTokens {
    pub member_id: DbId,
    pub nickname: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Everything that can go wrong in the session lifecycle.
///
/// Each variant carries a stable machine-readable code (see [`Self::code`]);
/// the HTTP status mapping lives in the API error layer.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username is already taken")]
    DuplicateUsername,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("authorization token is missing")]
    MissingToken,

    #[error("token has expired")]
    TokenExpired,

    #[error("token is invalid")]
    TokenInvalid,

    #[error("session has been revoked")]
    Revoked,

    #[error("member not found")]
    MemberNotFound,

    #[error("current password does not match")]
    PasswordMismatch,

    #[error("new password must differ from the current one")]
    PasswordUnchanged,

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::DuplicateUsername => "DUPLICATE_USERNAME",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::TokenInvalid => "TOKEN_INVALID",
            AuthError::Revoked => "SESSION_REVOKED",
            AuthError::MemberNotFound => "MEMBER_NOT_FOUND",
            AuthError::PasswordMismatch => "PASSWORD_MISMATCH",
            AuthError::PasswordUnchanged => "PASSWORD_UNCHANGED",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Store(_) | AuthError::Cache(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Invalid => AuthError::TokenInvalid,
        }
    }
}

impl From<CoreError> for AuthError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AuthError::Validation(msg),
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::Internal(format!("password hashing failed: {err}"))
    }
}

/// Orchestrates the session lifecycle over a member store and session cache.
pub struct SessionService {
    store: Arc<dyn MemberStore>,
    cache: Arc<dyn SessionCache>,
    config: AuthConfig,
}

impl SessionService {
    pub fn new(store: Arc<dyn MemberStore>, cache: Arc<dyn SessionCache>, config: AuthConfig) -> Self {
        Self { store, cache, config }
    }

    /// Create a new member account and open its first session.
    ///
    /// The username is checked for uniqueness before inserting, but the
    /// database unique constraint is the authority: a concurrent insert that
    /// slips past the pre-check still surfaces as
    /// [`AuthError::DuplicateUsername`]. On success the member is logged in:
    /// a token pair is issued and the refresh token stored under the session
    /// key.
    pub async fn register(&self, input: NewMember) -> Result<SessionTokens, AuthError> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("username must not be empty".into()));
        }
        if input.password.is_empty() {
            return Err(AuthError::Validation("password must not be empty".into()));
        }
        if input.nickname.trim().is_empty() {
            return Err(AuthError::Validation("nickname must not be empty".into()));
        }
        let birth = input.birth.to_date()?;

        if self.store.find_by_username(username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = password::hash_password(&input.password, self.config.bcrypt_cost)?;
        let create = CreateMember {
            username: username.to_string(),
            password_hash,
            nickname: input.nickname.trim().to_string(),
            birth,
        };

        let member = match self.store.create(&create).await {
            Ok(member) => member,
            Err(err) if is_unique_violation(&err) => return Err(AuthError::DuplicateUsername),
            Err(err) => return Err(err.into()),
        };

        let tokens = self.issue_pair(&member)?;
        self.cache
            .set(&session_key(member.id), &tokens.refresh_token)
            .await?;

        tracing::info!(member_id = member.id, "registered new member");
        Ok(tokens)
    }

    /// Authenticate a member and open a session.
    ///
    /// Issues a fresh access/refresh pair, stores the refresh token under the
    /// session key (replacing any previous one), and clears any dead-zone
    /// marker left by an earlier logout.
    pub async fn login(&self, credentials: Credentials) -> Result<SessionTokens, AuthError> {
        let member = self
            .store
            .find_by_username(credentials.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::matches(&credentials.password, &member.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_pair(&member)?;

        self.cache
            .set(&session_key(member.id), &tokens.refresh_token)
            .await?;
        self.cache.delete(&deadzone_key(member.id)).await?;

        tracing::info!(member_id = member.id, "member logged in");
        Ok(tokens)
    }

    /// Close the member's session.
    ///
    /// Drops the stored refresh token and writes a dead-zone marker whose TTL
    /// covers the access-token lifetime, so access tokens issued before the
    /// logout are refused until they would have expired anyway. Idempotent:
    /// logging out an already-logged-out member succeeds.
    pub async fn logout(&self, member_id: DbId) -> Result<(), AuthError> {
        self.cache.delete(&session_key(member_id)).await?;
        self.cache
            .set_with_ttl(&deadzone_key(member_id), "1", self.config.deadzone_ttl_secs)
            .await?;

        tracing::info!(member_id, "member logged out");
        Ok(())
    }

    /// Close the session named by a bearer access token.
    ///
    /// Unlike [`Self::verify_access`], this skips the dead-zone check: a
    /// member repeating a logout with the same (now revoked) access token
    /// gets a success, not an error. Only the signature and expiry gate the
    /// operation.
    pub async fn logout_bearer(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let claims = jwt::verify_token(bearer_token(authorization)?, &self.config.access_secret)?;
        self.logout(claims.member_id).await
    }

    /// Verify a bearer access token and return the authenticated member id.
    ///
    /// Checks, in order: header presence and `Bearer ` prefix, token
    /// signature and expiry against the access secret, that the member still
    /// exists, and that no dead-zone marker revokes the session.
    pub async fn verify_access(&self, authorization: Option<&str>) -> Result<DbId, AuthError> {
        let claims =
            jwt::verify_token(bearer_token(authorization)?, &self.config.access_secret)?;

        // A token for a deleted account is structurally fine but names
        // nobody; treat it the same as a forged one.
        if self.store.find_by_id(claims.member_id).await?.is_none() {
            return Err(AuthError::TokenInvalid);
        }

        if self.cache.get(&deadzone_key(claims.member_id)).await?.is_some() {
            return Err(AuthError::Revoked);
        }

        Ok(claims.member_id)
    }

    /// Fetch the member's own record.
    pub async fn member(&self, member_id: DbId) -> Result<MemberResponse, AuthError> {
        let member = self
            .store
            .find_by_id(member_id)
            .await?
            .ok_or(AuthError::MemberNotFound)?;
        Ok(member.into())
    }

    /// Change the member's password after re-verifying the current one.
    pub async fn update_password(
        &self,
        member_id: DbId,
        current: &str,
        new: &str,
    ) -> Result<(), AuthError> {
        if new.is_empty() {
            return Err(AuthError::Validation("new password must not be empty".into()));
        }

        let member = self
            .store
            .find_by_id(member_id)
            .await?
            .ok_or(AuthError::MemberNotFound)?;

        if !password::matches(current, &member.password_hash) {
            return Err(AuthError::PasswordMismatch);
        }
        if current == new {
            return Err(AuthError::PasswordUnchanged);
        }

        let hash = password::hash_password(new, self.config.bcrypt_cost)?;
        if !self.store.update_password(member_id, &hash).await? {
            return Err(AuthError::MemberNotFound);
        }

        tracing::info!(member_id, "member password updated");
        Ok(())
    }

    /// Change the member's nickname. Rejects a change to the same value.
    pub async fn update_nickname(&self, member_id: DbId, nickname: &str) -> Result<(), AuthError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(AuthError::Validation("nickname must not be empty".into()));
        }

        let member = self
            .store
            .find_by_id(member_id)
            .await?
            .ok_or(AuthError::MemberNotFound)?;
        if member.nickname == nickname {
            return Err(AuthError::Validation("nickname is unchanged".into()));
        }

        if !self.store.update_nickname(member_id, nickname).await? {
            return Err(AuthError::MemberNotFound);
        }
        Ok(())
    }

    /// Change the member's profile text, returning the updated member.
    pub async fn update_profile(
        &self,
        member_id: DbId,
        profile: &str,
    ) -> Result<MemberResponse, AuthError> {
        let member = self
            .store
            .update_profile(member_id, profile)
            .await?
            .ok_or(AuthError::MemberNotFound)?;
        Ok(member.into())
    }

    /// Delete the member's account and drop both session-cache keys.
    pub async fn delete_account(&self, member_id: DbId) -> Result<(), AuthError> {
        if !self.store.delete(member_id).await? {
            return Err(AuthError::MemberNotFound);
        }

        self.cache.delete(&session_key(member_id)).await?;
        self.cache.delete(&deadzone_key(member_id)).await?;

        tracing::info!(member_id, "member account deleted");
        Ok(())
    }

    fn issue_pair(&self, member: &Member) -> Result<SessionTokens, AuthError> {
        let access_token =
            jwt::issue_token(member.id, &self.config.access_secret, self.config.access_ttl)
                .map_err(|err| AuthError::Internal(format!("token signing failed: {err}")))?;
        let refresh_token =
            jwt::issue_token(member.id, &self.config.refresh_secret, self.config.refresh_ttl)
                .map_err(|err| AuthError::Internal(format!("token signing failed: {err}")))?;

        Ok(SessionTokens {
            member_id: member.id,
            nickname: member.nickname.clone(),
            access_token,
            refresh_token,
        })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    authorization
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)
}

/// True when the error is a Postgres unique-constraint violation (23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(AuthError::DuplicateUsername.code(), "DUPLICATE_USERNAME");
        assert_eq!(AuthError::Revoked.code(), "SESSION_REVOKED");
        assert_eq!(AuthError::Internal("x".into()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_token_error_conversion() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::TokenExpired
        ));
        assert!(matches!(
            AuthError::from(TokenError::Invalid),
            AuthError::TokenInvalid
        ));
    }
}
