//! HTTP API for the keygate service.
//!
//! Route layout:
//!
//! - `POST /auth/register` and `POST /auth/login` are public.
//! - `GET /private` sits behind [`mw_require_auth`] and demonstrates a
//!   protected resource.
//!
//! The context resolver runs on every request so handlers can extract
//! [`Ctx`] wherever they need the caller's identity.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use keygate_auth::{jwt::TokenAuthority, secret_hash, secret_hash::SecretHasher};
use keygate_models::db::connection::DbConnection;
use keygate_web::{
    ctx::{Ctx, CtxUser, resolver::mw_ctx_resolver},
    mw_auth::mw_require_auth,
    user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserApi},
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::config::ServiceConfig;
use crate::prelude::*;
use keygate_web::prelude::Result as WebResult;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential store connection pool.
    pub connection: DbConnection,
    /// Password hasher with the configured cost.
    pub hasher: SecretHasher,
    /// Token issuer/verifier.
    pub tokens: TokenAuthority,
}

impl AppState {
    /// Builds the state from the service configuration.
    pub fn new(connection: DbConnection, config: &ServiceConfig) -> Result<Self> {
        let hasher = match (
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
        ) {
            (None, None, None) => SecretHasher::default(),
            (memory, iterations, parallelism) => SecretHasher::with_cost(
                memory.unwrap_or(secret_hash::DEFAULT_MEMORY_KIB),
                iterations.unwrap_or(secret_hash::DEFAULT_ITERATIONS),
                parallelism.unwrap_or(secret_hash::DEFAULT_PARALLELISM),
            )?,
        };
        let tokens = TokenAuthority::with_ttl(config.jwt_secret.as_bytes(), config.token_ttl);

        Ok(Self {
            connection,
            hasher,
            tokens,
        })
    }
}

/// Response for the example protected resource.
#[derive(Debug, Serialize, Deserialize)]
pub struct PrivateResponse {
    pub message: String,
    pub user: CtxUser,
}

pub async fn setup_api(state: AppState, bind_addr: &str) -> Result<JoinHandle<Result<()>>> {
    let private_routes = Router::new()
        .route("/private", get(private))
        .route_layer(middleware::from_fn(mw_require_auth));

    let auth_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let app = Router::new()
        .merge(private_routes)
        .merge(auth_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::debug!("listening on {}", listener.local_addr()?);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    Ok(handle)
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> WebResult<(StatusCode, Json<RegisterResponse>)> {
    let user: UserApi =
        keygate_web::user::register(payload, &state.hasher, &state.connection).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: String::from("User registered successfully"),
            user,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> WebResult<Json<LoginResponse>> {
    Ok(Json(
        keygate_web::user::login(
            payload,
            &state.hasher,
            &state.tokens,
            &state.connection,
            &cookies,
        )
        .await?,
    ))
}

async fn private(ctx: Ctx) -> WebResult<Json<PrivateResponse>> {
    Ok(Json(PrivateResponse {
        message: String::from("Welcome to private routes"),
        user: ctx.user,
    }))
}
