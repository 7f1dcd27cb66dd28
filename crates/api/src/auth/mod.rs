//! Authentication and session-lifecycle primitives.
//!
//! - [`password`] -- bcrypt password hashing and verification.
//! - [`jwt`] -- signed access/refresh token issuance and verification.
//! - [`session`] -- the register/login/logout/verify lifecycle over the
//!   member store and session cache.

pub mod jwt;
pub mod password;
pub mod session;

use jwt::Ttl;

/// Authentication configuration: hash cost, token secrets/TTLs, and the
/// post-logout dead-zone duration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// bcrypt work factor (4..=31).
    pub bcrypt_cost: u32,
    /// HMAC secret for access tokens.
    pub access_secret: String,
    /// Access token lifetime.
    pub access_ttl: Ttl,
    /// HMAC secret for refresh tokens. Must differ from `access_secret`.
    pub refresh_secret: String,
    /// Refresh token lifetime.
    pub refresh_ttl: Ttl,
    /// Dead-zone entry lifetime in seconds. Must cover `access_ttl`, or a
    /// still-valid access token could outlive its deny-list entry.
    pub deadzone_ttl_secs: u64,
}

impl AuthConfig {
    /// Load authentication configuration from environment variables.
    ///
    /// | Env Var              | Required | Form                          |
    /// |----------------------|----------|-------------------------------|
    /// | `BCRYPT_COST`        | **yes**  | integer, 4..=31               |
    /// | `JWT_ACCESS_SECRET`  | **yes**  | non-empty string              |
    /// | `JWT_ACCESS_TTL`     | **yes**  | seconds (`"900"`) or `"15m"`  |
    /// | `JWT_REFRESH_SECRET` | **yes**  | non-empty string              |
    /// | `JWT_REFRESH_TTL`    | **yes**  | seconds or `"7d"`             |
    /// | `DEADZONE_TTL_SECS`  | **yes**  | seconds, >= access ttl        |
    ///
    /// # Panics
    ///
    /// Panics if any variable is missing or malformed, or if the invariants
    /// above are violated. Configuration failures are fatal at startup, never
    /// per-request errors.
    pub fn from_env() -> Self {
        let required = |key: &str| -> String {
            let value =
                std::env::var(key).unwrap_or_else(|_| panic!("{key} must be set in the environment"));
            assert!(!value.is_empty(), "{key} must not be empty");
            value
        };

        let bcrypt_cost: u32 = required("BCRYPT_COST")
            .parse()
            .expect("BCRYPT_COST must be a valid u32");

        let access_secret = required("JWT_ACCESS_SECRET");
        let access_ttl: Ttl = required("JWT_ACCESS_TTL")
            .parse()
            .expect("JWT_ACCESS_TTL must be a second count or duration like '15m'");

        let refresh_secret = required("JWT_REFRESH_SECRET");
        let refresh_ttl: Ttl = required("JWT_REFRESH_TTL")
            .parse()
            .expect("JWT_REFRESH_TTL must be a second count or duration like '7d'");

        let deadzone_ttl_secs: u64 = required("DEADZONE_TTL_SECS")
            .parse()
            .expect("DEADZONE_TTL_SECS must be a valid u64");

        let config = Self {
            bcrypt_cost,
            access_secret,
            access_ttl,
            refresh_secret,
            refresh_ttl,
            deadzone_ttl_secs,
        };
        config.validate();
        config
    }

    /// Enforce startup invariants on the configuration.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range bcrypt cost, identical secrets, or a
    /// dead-zone shorter than the access-token lifetime.
    pub fn validate(&self) {
        assert!(
            (4..=31).contains(&self.bcrypt_cost),
            "BCRYPT_COST must be between 4 and 31"
        );
        assert_ne!(
            self.access_secret, self.refresh_secret,
            "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ"
        );
        assert!(
            self.deadzone_ttl_secs as i64 >= self.access_ttl.as_secs(),
            "DEADZONE_TTL_SECS must be >= the access token ttl, \
             otherwise a logged-out access token would outlive its deny-list entry"
        );
    }
}
