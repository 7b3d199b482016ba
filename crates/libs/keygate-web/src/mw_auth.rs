//! Authentication middleware for protecting routes.
//!
//! This module provides the middleware gate for routes that require a
//! verified bearer token.

use crate::prelude::*;
use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;

/// Middleware that requires authentication for a route.
///
/// This middleware checks if a valid authentication context exists.
/// If no valid context is found, the request is rejected with a 401;
/// missing, malformed and expired tokens are deliberately not
/// distinguished in the response.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use keygate_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/private", get(private_handler))
///     .layer(axum::middleware::from_fn(mw_require_auth));
///
/// async fn private_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
