//! Error types for the keygate service.

/// Errors that can occur while running the keygate service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::error::Error),

    #[error(transparent)]
    Model(#[from] keygate_models::error::Error),

    #[error(transparent)]
    Web(#[from] keygate_web::error::Error),

    #[error(transparent)]
    Auth(#[from] keygate_auth::error::Error),

    #[error("Invalid configuration value for '{0}'")]
    Config(&'static str),
}
