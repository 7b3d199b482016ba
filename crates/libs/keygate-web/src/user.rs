//! Register and login flows.
//!
//! These are the two orchestration paths of the service. Both validate
//! input first, then talk to the credential store and the hashing and
//! token primitives. Password hashing and verification are CPU-bound
//! and run on the blocking pool so concurrent logins do not serialize
//! behind each other on the async runtime.

use chrono::{DateTime, Utc};
use keygate_auth::{TOKEN_TYPE, jwt::TokenAuthority, secret_hash::SecretHasher};
use keygate_models::{db::connection::DbConnection, user::User, user::UserCreate};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::ctx::resolver::AUTH_TOKEN_COOKIE;
use crate::prelude::*;

/// Minimum username length in characters.
pub const USERNAME_MIN_LEN: usize = 3;
/// Maximum username length in characters.
pub const USERNAME_MAX_LEN: usize = 64;

/// Credentials submitted on registration.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Credentials submitted on login.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserApi {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Successful registration response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserApi,
}

/// Successful login response carrying the bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub token_type: String,
}

fn validate_non_empty(name: &str, password: &str, missing: Error) -> Result<()> {
    if name.is_empty() || password.is_empty() {
        return Err(missing);
    }
    Ok(())
}

fn validate_username(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(Error::UsernameLength);
    }
    Ok(())
}

/// Registers a new user.
///
/// Validates both fields, hashes the password off the async path, and
/// creates the record. The store's unique index makes the
/// existence-check-then-create atomic: of two concurrent registrations
/// for the same username exactly one commits, the other fails with
/// [`Error::DuplicateUsername`].
///
/// # Examples
///
/// ```rust,no_run
/// use keygate_auth::secret_hash::SecretHasher;
/// use keygate_web::user::{RegisterRequest, register};
/// # use keygate_models::db::connection::DbConnection;
///
/// # async fn example(db: &DbConnection) -> Result<(), Box<dyn std::error::Error>> {
/// let payload = RegisterRequest {
///     username: String::from("alice"),
///     password: String::from("secret1"),
/// };
/// let user = register(payload, &SecretHasher::default(), db).await?;
/// assert_eq!(user.username, "alice");
/// # Ok(())
/// # }
/// ```
pub async fn register(
    payload: RegisterRequest,
    hasher: &SecretHasher,
    connection: &DbConnection,
) -> Result<UserApi> {
    validate_non_empty(&payload.username, &payload.password, Error::MissingFields)?;
    validate_username(&payload.username)?;

    let hasher = hasher.clone();
    let password = payload.password;
    let hash = tokio::task::spawn_blocking(move || hasher.generate(&password))
        .await
        .map_err(|_| Error::HashTask)?
        .map_err(Error::Auth)?;

    let user = UserCreate::new(payload.username, hash)
        .create(connection)
        .map_err(|err| match err {
            keygate_models::error::Error::UniqueViolation => Error::DuplicateUsername,
            other => Error::Models(other),
        })?;

    Ok(UserApi {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
    })
}

/// Authenticates a user and issues a bearer token.
///
/// An unknown username and a wrong password both fail with
/// [`Error::WrongCredentials`]; the distinction is never leaked to the
/// caller. On success the token is also set as an auth cookie for
/// browser clients.
pub async fn login(
    payload: LoginRequest,
    hasher: &SecretHasher,
    tokens: &TokenAuthority,
    connection: &DbConnection,
    cookies: &Cookies,
) -> Result<LoginResponse> {
    validate_non_empty(
        &payload.username,
        &payload.password,
        Error::MissingCredentials,
    )?;

    let Some(user) = User::fetch_by_username(&payload.username, connection)? else {
        return Err(Error::WrongCredentials);
    };

    let hasher = hasher.clone();
    let password = payload.password;
    let hash = user.hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|_| Error::HashTask)?;
    if !is_valid {
        return Err(Error::WrongCredentials);
    }

    let token = tokens.issue(user.id, &user.username)?;
    cookies.add(Cookie::new(AUTH_TOKEN_COOKIE, token.clone()));

    Ok(LoginResponse {
        message: String::from("Logged in successfully"),
        token,
        token_type: String::from(TOKEN_TYPE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(
            validate_non_empty("", "secret1", Error::MissingFields),
            Err(Error::MissingFields)
        ));
        assert!(matches!(
            validate_non_empty("alice", "", Error::MissingCredentials),
            Err(Error::MissingCredentials)
        ));
        assert!(validate_non_empty("alice", "secret1", Error::MissingFields).is_ok());
    }

    #[test]
    fn username_length_bounds_are_enforced() {
        assert!(matches!(
            validate_username("ab"),
            Err(Error::UsernameLength)
        ));
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(USERNAME_MAX_LEN)).is_ok());
        assert!(matches!(
            validate_username(&"a".repeat(USERNAME_MAX_LEN + 1)),
            Err(Error::UsernameLength)
        ));
    }
}
