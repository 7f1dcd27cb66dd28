//! Key-value session cache contract and implementations.
//!
//! The session lifecycle keeps all of its durable state in this cache under
//! two key families:
//!
//! - `session:<member_id>` -- the member's current refresh token. Written on
//!   register/login, deleted on logout and account deletion. No TTL: it is
//!   superseded by later logins/logouts, not by time.
//! - `deadzone:<member_id>` -- a marker set on logout with a bounded TTL.
//!   While it lives, every access token for that member is rejected.
//!
//! [`RedisCache`] is the production implementation; [`InMemoryCache`] backs
//! tests and single-process deployments.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use teamup_core::types::DbId;

pub use memory::InMemoryCache;
pub use redis::RedisCache;

/// Failure from the cache backend. Never retried by callers; surfaced as an
/// internal error at the lifecycle boundary.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Key-value interface consumed by the session lifecycle.
///
/// Implementations must provide atomic single-key operations; the lifecycle
/// never needs multi-key transactions.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` with no expiry, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Store `value` under `key`, expiring automatically after `ttl_secs`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache key holding the member's current refresh token.
pub fn session_key(member_id: DbId) -> String {
    format!("session:{member_id}")
}

/// Cache key marking the member's post-logout dead zone.
pub fn deadzone_key(member_id: DbId) -> String {
    format!("deadzone:{member_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_families_are_disjoint() {
        assert_eq!(session_key(42), "session:42");
        assert_eq!(deadzone_key(42), "deadzone:42");
        assert_ne!(session_key(1), deadzone_key(1));
    }
}
