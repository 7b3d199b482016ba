//! Authentication error types.

/// Authentication errors.
#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    /// Token is malformed or its signature does not match.
    #[error("Invalid Token")]
    InvalidToken,
    /// No token was provided.
    #[error("Token Missing")]
    TokenMissing,
    /// Token signature is valid but the token has expired.
    #[error("Token Expired")]
    TokenExpired,
    /// Token lifetime arithmetic overflowed.
    #[error("Token lifetime out of range")]
    TokenLifetime,
    /// Token signing failed.
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failed.
    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),

    /// Invalid hashing cost parameters.
    #[error("Invalid hash parameters: {0}")]
    HashParams(argon2::Error),
}
