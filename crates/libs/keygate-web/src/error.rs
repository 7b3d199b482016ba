//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Models(#[from] keygate_models::error::Error),

    #[error(transparent)]
    Auth(#[from] keygate_auth::error::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /* Api Errors */
    #[error("Missing Fields")]
    MissingFields,

    #[error("Invalid Username Length")]
    UsernameLength,

    #[error("Duplicate Username")]
    DuplicateUsername,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Missing Credentials")]
    MissingCredentials,

    #[error("Context Missing")]
    CtxMissing,

    #[error("Hashing task failed")]
    HashTask,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        error!("Creating API error response for error: {:?}", self);
        let (status, message) = match self {
            Error::MissingFields => (StatusCode::BAD_REQUEST, "Username and password are required"),
            Error::UsernameLength => (
                StatusCode::BAD_REQUEST,
                "Username must be between 3 and 64 characters",
            ),
            Error::DuplicateUsername => (
                StatusCode::BAD_REQUEST,
                "User with this username already exists",
            ),
            Error::WrongCredentials => (StatusCode::UNAUTHORIZED, "Invalid username or password"),
            Error::MissingCredentials | Error::CtxMissing => {
                (StatusCode::UNAUTHORIZED, "Missing credentials")
            }
            Error::Auth(err) => match err {
                keygate_auth::error::Error::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "Invalid authentication token")
                }
                keygate_auth::error::Error::TokenMissing => {
                    (StatusCode::UNAUTHORIZED, "Access denied. No token provided")
                }
                keygate_auth::error::Error::TokenExpired => {
                    (StatusCode::UNAUTHORIZED, "Authentication token expired")
                }
                keygate_auth::error::Error::TokenLifetime
                | keygate_auth::error::Error::TokenCreation(_)
                | keygate_auth::error::Error::PasswordHash(_)
                | keygate_auth::error::Error::HashParams(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            Error::IO(_) | Error::Json(_) | Error::Models(_) | Error::HashTask => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}
