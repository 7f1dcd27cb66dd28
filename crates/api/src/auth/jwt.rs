//! Signed access/refresh token issuance and verification.
//!
//! Both token kinds are HS256-signed JWTs carrying a [`Claims`] payload with
//! the member id; they differ only in the secret and lifetime used. Access
//! tokens verify without any storage lookup; the deny-list check on top of
//! them lives in [`crate::auth::session`].

use std::str::FromStr;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use teamup_core::types::DbId;

/// JWT claims embedded in every token.
///
/// Decoding is schema-validated: a token whose payload does not deserialize
/// into this exact shape fails as [`TokenError::Invalid`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The member's internal database id.
    pub member_id: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Why a token failed verification. Callers must branch on this: an expired
/// token prompts re-authentication, a tampered or malformed one is rejected
/// outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is invalid")]
    Invalid,
}

/// Token lifetime, parsed from either a bare second count (`"900"`) or a
/// duration string with a unit suffix (`"15m"`, `"12h"`, `"7d"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl(i64);

impl Ttl {
    /// Construct from a positive number of seconds.
    pub fn from_secs(secs: i64) -> Result<Self, String> {
        if secs <= 0 {
            return Err(format!("ttl must be positive, got {secs}"));
        }
        Ok(Self(secs))
    }

    pub fn as_secs(self) -> i64 {
        self.0
    }
}

impl FromStr for Ttl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("ttl must not be empty".to_string());
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            let secs: i64 = s.parse().map_err(|_| format!("ttl '{s}' is out of range"))?;
            return Ttl::from_secs(secs);
        }

        // The unit suffix may be any char, so split on a char boundary rather
        // than a byte index.
        let Some((unit_start, unit)) = s.char_indices().last() else {
            return Err("ttl must not be empty".to_string());
        };
        let count: i64 = s[..unit_start]
            .parse()
            .map_err(|_| format!("ttl '{s}' is not a second count or '<n><s|m|h|d>' duration"))?;
        let multiplier = match unit {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86400,
            other => return Err(format!("unknown ttl unit '{other}' in '{s}'")),
        };

        Ttl::from_secs(
            count
                .checked_mul(multiplier)
                .ok_or_else(|| format!("ttl '{s}' is out of range"))?,
        )
    }
}

/// Issue an HS256 token for the given member, expiring after `ttl`.
pub fn issue_token(
    member_id: DbId,
    secret: &str,
    ttl: Ttl,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        member_id,
        iat: now,
        exp: now + ttl.as_secs(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry, returning the embedded [`Claims`].
///
/// Expiry is checked with zero leeway so that short-lived tokens expire on
/// schedule. Any failure other than expiry -- bad signature, wrong secret,
/// malformed structure, missing claims -- collapses to [`TokenError::Invalid`].
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::default(); // HS256, requires exp
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let ttl = Ttl::from_secs(900).unwrap();
        let token = issue_token(42, SECRET, ttl).expect("issuing should succeed");

        let claims = verify_token(&token, SECRET).expect("verification should succeed");
        assert_eq!(claims.member_id, 42);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_cross_secret_rejection() {
        let ttl = Ttl::from_secs(900).unwrap();
        let token = issue_token(1, "refresh-secret", ttl).expect("issuing should succeed");

        // A refresh-signed token must never verify against the access secret.
        assert_eq!(verify_token(&token, "access-secret"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_distinct_from_tampered() {
        // Craft an already-expired token directly.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            member_id: 7,
            iat: now - 10,
            exp: now - 2,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encoding should succeed");

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::Expired));
        assert_eq!(
            verify_token("definitely.not.a-jwt", SECRET),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_payload_shape_is_enforced() {
        // A structurally valid JWT whose payload lacks member_id must fail
        // as Invalid, not panic or half-decode.
        #[derive(serde::Serialize)]
        struct OtherClaims {
            sub: String,
            exp: i64,
        }
        let token = encode(
            &Header::default(),
            &OtherClaims {
                sub: "someone".into(),
                exp: chrono::Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::Invalid));
    }

    #[test]
    fn test_ttl_parses_seconds_and_durations() {
        assert_eq!("900".parse::<Ttl>().unwrap().as_secs(), 900);
        assert_eq!("30s".parse::<Ttl>().unwrap().as_secs(), 30);
        assert_eq!("15m".parse::<Ttl>().unwrap().as_secs(), 900);
        assert_eq!("12h".parse::<Ttl>().unwrap().as_secs(), 43_200);
        assert_eq!("7d".parse::<Ttl>().unwrap().as_secs(), 604_800);
    }

    #[test]
    fn test_ttl_rejects_garbage() {
        assert!("".parse::<Ttl>().is_err());
        assert!("0".parse::<Ttl>().is_err());
        assert!("-5".parse::<Ttl>().is_err());
        assert!("15x".parse::<Ttl>().is_err());
        assert!("m15".parse::<Ttl>().is_err());
    }

    #[test]
    fn test_ttl_rejects_multibyte_unit_without_panicking() {
        // A non-ASCII suffix lands mid-codepoint if the split uses byte
        // indices; it must come back as a parse error instead.
        assert!("15分".parse::<Ttl>().is_err());
        assert!("900秒".parse::<Ttl>().is_err());
        assert!("é".parse::<Ttl>().is_err());
    }
}
