//! Service configuration from the environment.
//!
//! Everything security-relevant is supplied externally: the signing
//! secret, the token lifetime, the hashing cost and the storage
//! connection string. Nothing is hard-coded.

use chrono::TimeDelta;
use keygate_auth::jwt::DEFAULT_TOKEN_TTL;

use crate::prelude::*;

/// Runtime configuration for the keygate service.
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// Token lifetime.
    pub token_ttl: TimeDelta,
    /// Optional Argon2 memory cost override (KiB).
    pub hash_memory_kib: Option<u32>,
    /// Optional Argon2 iteration count override.
    pub hash_iterations: Option<u32>,
    /// Optional Argon2 parallelism override.
    pub hash_parallelism: Option<u32>,
}

fn optional_u32(var: &'static str) -> Result<Option<u32>> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(value.parse().map_err(|_| Error::Config(var))?)),
        Err(_) => Ok(None),
    }
}

impl ServiceConfig {
    /// Reads the configuration from environment variables.
    ///
    /// `JWT_SECRET` is required; everything else has a default. The
    /// secret is required up front so a misconfigured service fails at
    /// startup rather than on the first login.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").expect("Env Variable 'JWT_SECRET' missing");

        let bind_addr =
            std::env::var("KEYGATED_ADDR").unwrap_or_else(|_| String::from("127.0.0.1:3000"));

        let token_ttl = match std::env::var("TOKEN_TTL_SECONDS") {
            Ok(value) => TimeDelta::seconds(
                value
                    .parse()
                    .map_err(|_| Error::Config("TOKEN_TTL_SECONDS"))?,
            ),
            Err(_) => DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl,
            hash_memory_kib: optional_u32("HASH_MEMORY_KIB")?,
            hash_iterations: optional_u32("HASH_ITERATIONS")?,
            hash_parallelism: optional_u32("HASH_PARALLELISM")?,
        })
    }
}
