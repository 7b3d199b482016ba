//! Authentication primitives for the keygate credential authority.
//!
//! This library provides the two security-sensitive building blocks the
//! rest of keygate is assembled from:
//!
//! - [`secret_hash`]: salted one-way password hashing and verification
//! - [`jwt`]: issuance and verification of signed, time-limited bearer
//!   tokens

pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

/// Header carrying the bearer token on protected requests.
pub const AUTH_HEADER: &str = "Authorization";

/// Optional scheme prefix in front of the bearer token.
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";

/// Token type reported to clients.
pub const TOKEN_TYPE: &str = "Bearer";

/// Issuer claim embedded in every token.
pub const ISS: &str = "keygate";
