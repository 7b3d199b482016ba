//! Issuance and verification of signed bearer tokens.
//!
//! A [`TokenAuthority`] owns the signing secret and the token lifetime.
//! Tokens are self-contained JWTs (HS256) carrying the subject id, the
//! username and the usual time claims; nothing is stored server-side.
//!
//! The authority reads time through a [`Clock`] so that expiry behavior
//! is testable and signing is byte-stable for a fixed payload, secret
//! and clock.
//!
//! # Examples
//!
//! ```rust
//! use keygate_auth::jwt::TokenAuthority;
//! use uuid::Uuid;
//!
//! let authority = TokenAuthority::new(b"MySuperSecret");
//!
//! let subject = Uuid::new_v4();
//! let token = authority.issue(subject, "alice").unwrap();
//!
//! let claims = authority.verify(&token).unwrap();
//! assert_eq!(claims.sub, subject);
//! assert_eq!(claims.username, "alice");
//! ```

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ISS;
use crate::prelude::*;

/// JWT signing algorithm used throughout keygate.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::hours(1);

/// Time source for token issuance and expiry checks.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock. Used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Claims carried by every keygate token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Subject (user id).
    pub sub: Uuid,
    /// Username of the subject.
    pub username: String,
    /// Issuer.
    pub iss: String,
    /// Issued at time (unix seconds).
    pub iat: i64,
    /// Expiration time (unix seconds).
    pub exp: i64,
}

/// Cryptographic key pair for JWT signing and verification.
struct Keys {
    /// Key used for signing new JWT tokens.
    encoding: EncodingKey,
    /// Key used for verifying existing JWT tokens.
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and verifies signed, time-limited bearer tokens.
#[derive(Clone)]
pub struct TokenAuthority {
    keys: Arc<Keys>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl TokenAuthority {
    /// Creates an authority with the default token lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL)
    }

    /// Creates an authority with an explicit token lifetime.
    ///
    /// A non-positive `ttl` produces tokens that are already expired,
    /// which is occasionally useful in tests.
    pub fn with_ttl(secret: &[u8], ttl: TimeDelta) -> Self {
        Self {
            keys: Arc::new(Keys::new(secret)),
            ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Creates a signed token for the given subject.
    ///
    /// The token carries `sub`, `username`, `iss`, `iat` and `exp`
    /// claims and is signed with this authority's secret. Claims are
    /// signed for integrity, not encrypted.
    pub fn issue(&self, subject: Uuid, username: &str) -> Result<String> {
        let now = self.clock.now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or(Error::TokenLifetime)?;

        let claims = AuthToken {
            sub: subject,
            username: String::from(username),
            iss: String::from(ISS),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::new(ALGORITHM);
        Ok(encode(&header, &claims, &self.keys.encoding)?)
    }

    /// Validates a token and extracts its claims.
    ///
    /// A malformed token or a signature mismatch fails with
    /// [`Error::InvalidToken`]; a structurally valid token past its
    /// expiry fails with [`Error::TokenExpired`]. Expiry is checked
    /// against this authority's clock, not the library default, so
    /// tests can control it.
    pub fn verify(&self, token: &str) -> Result<AuthToken> {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;

        let data =
            decode::<AuthToken>(token, &self.keys.decoding, &validation).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => Error::TokenExpired,
                    _ => Error::InvalidToken,
                }
            })?;

        if data.claims.exp <= self.clock.now().timestamp() {
            return Err(Error::TokenExpired);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn subject() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn issue_then_verify_returns_original_claims() {
        let authority = TokenAuthority::new(b"test-secret");
        let id = subject();

        let token = authority.issue(id, "alice").unwrap();
        let claims = authority.verify(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, ISS);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL.num_seconds());
    }

    #[test]
    fn verify_with_different_secret_fails_invalid() {
        let issuer = TokenAuthority::new(b"secret-a");
        let verifier = TokenAuthority::new(b"secret-b");

        let token = issuer.issue(subject(), "alice").unwrap();
        assert!(matches!(verifier.verify(&token), Err(Error::InvalidToken)));
    }

    #[test]
    fn verify_rejects_garbage() {
        let authority = TokenAuthority::new(b"test-secret");
        assert!(matches!(
            authority.verify("not.a.token"),
            Err(Error::InvalidToken)
        ));
        assert!(matches!(authority.verify(""), Err(Error::InvalidToken)));
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let authority = TokenAuthority::new(b"test-secret");
        let token = authority.issue(subject(), "alice").unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = parts[1].to_string().to_uppercase();
        parts[1] = &forged;
        let tampered = parts.join(".");

        assert!(matches!(
            authority.verify(&tampered),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn negative_ttl_token_is_expired() {
        let authority = TokenAuthority::with_ttl(b"test-secret", TimeDelta::seconds(-1));
        let token = authority.issue(subject(), "alice").unwrap();
        assert!(matches!(authority.verify(&token), Err(Error::TokenExpired)));
    }

    #[test]
    fn token_expires_once_clock_passes_exp() {
        let issued_at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let authority = TokenAuthority::with_ttl(b"test-secret", TimeDelta::hours(1))
            .with_clock(Arc::new(FixedClock(issued_at)));
        let token = authority.issue(subject(), "alice").unwrap();

        // Still valid just before expiry.
        let before = issued_at + TimeDelta::minutes(59);
        let authority = authority.with_clock(Arc::new(FixedClock(before)));
        assert!(authority.verify(&token).is_ok());

        let after = issued_at + TimeDelta::hours(2);
        let authority = authority.with_clock(Arc::new(FixedClock(after)));
        assert!(matches!(authority.verify(&token), Err(Error::TokenExpired)));
    }

    #[test]
    fn signing_is_deterministic_for_fixed_clock() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let authority =
            TokenAuthority::new(b"test-secret").with_clock(Arc::new(FixedClock(now)));
        let id = subject();

        let first = authority.issue(id, "alice").unwrap();
        let second = authority.issue(id, "alice").unwrap();
        assert_eq!(first, second);
    }
}
