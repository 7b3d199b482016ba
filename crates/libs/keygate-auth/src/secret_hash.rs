//! Salted one-way password hashing and verification using Argon2.
//!
//! A [`SecretHasher`] hashes passwords with a fresh random salt per call
//! and emits a self-describing PHC string (algorithm, cost, salt and
//! digest), so verification needs nothing but the stored string. Cost
//! parameters are tunable to keep verification latency bounded as
//! hardware improves.
//!
//! # Examples
//!
//! ```rust
//! use keygate_auth::secret_hash::SecretHasher;
//!
//! let hasher = SecretHasher::default();
//!
//! let hash = hasher.generate("user_password_123").unwrap();
//! assert!(hasher.verify("user_password_123", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Default Argon2 memory cost in KiB.
pub const DEFAULT_MEMORY_KIB: u32 = Params::DEFAULT_M_COST;
/// Default Argon2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = Params::DEFAULT_T_COST;
/// Default Argon2 parallelism.
pub const DEFAULT_PARALLELISM: u32 = Params::DEFAULT_P_COST;

/// Hashes and verifies passwords with configurable Argon2id cost.
#[derive(Debug, Clone)]
pub struct SecretHasher {
    params: Params,
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl SecretHasher {
    /// Creates a hasher with explicit cost parameters.
    ///
    /// # Arguments
    ///
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes over memory
    /// * `parallelism` - Degree of parallelism
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params =
            Params::new(memory_kib, iterations, parallelism, None).map_err(Error::HashParams)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Generates a secure hash for the provided password.
    ///
    /// Every call draws a fresh random salt, so hashing the same
    /// password twice yields two different strings that both verify.
    pub fn generate(&self, pw: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self.argon2().hash_password(pw.as_bytes(), &salt)?.to_string())
    }

    /// Verifies a password against a stored hash.
    ///
    /// The salt and cost are taken from the hash string itself and the
    /// digest comparison is constant-time. A malformed hash never
    /// errors; it simply does not verify.
    pub fn verify(&self, pw: &str, hash: &str) -> bool {
        let Ok(hash) = PasswordHashString::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(pw.as_bytes(), &hash.password_hash())
            .is_ok()
    }
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hasher = SecretHasher::default();
        let hash = hasher.generate("secret1").unwrap();
        assert!(hasher.verify("secret1", &hash));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hasher = SecretHasher::default();
        let hash = hasher.generate("secret1").unwrap();
        assert!(!hasher.verify("secret2", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn salts_are_unique_per_call() {
        let hasher = SecretHasher::default();
        let first = hasher.generate("secret1").unwrap();
        let second = hasher.generate("secret1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        let hasher = SecretHasher::default();
        assert!(!hasher.verify("secret1", "not-a-phc-string"));
        assert!(!hasher.verify("secret1", ""));
        assert!(!hasher.verify("secret1", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn custom_cost_produces_verifiable_hashes() {
        let hasher = SecretHasher::with_cost(8192, 1, 1).unwrap();
        let hash = hasher.generate("secret1").unwrap();
        assert!(hash.contains("m=8192"));
        assert!(hasher.verify("secret1", &hash));
    }

    #[test]
    fn zero_cost_is_rejected() {
        assert!(matches!(
            SecretHasher::with_cost(0, 0, 0),
            Err(Error::HashParams(_))
        ));
    }
}
