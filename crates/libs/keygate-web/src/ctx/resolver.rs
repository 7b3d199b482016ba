//! Context resolver for extracting the caller from HTTP requests.
//!
//! The resolver runs as middleware on every request. It pulls the bearer
//! token from the auth cookie or the `Authorization` header, verifies it
//! against the [`TokenAuthority`], and stores the outcome in the request
//! extensions. Downstream guards and handlers extract [`Ctx`] from
//! there; the token itself is never mutated.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use keygate_auth::{AUTH_HEADER, AUTH_HEADER_PREFIX, jwt::TokenAuthority};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use crate::ctx::Ctx;
use crate::prelude::*;

/// The name of the cookie used to store authentication tokens.
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

/// Middleware for resolving request context from authentication tokens.
///
/// Extracts authentication tokens from cookies or the `Authorization`
/// header, validates them, and adds the resulting context to the
/// request extensions. Verification failures are logged with their
/// reason here; callers only ever see an undifferentiated 401.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::Router;
/// use keygate_auth::jwt::TokenAuthority;
/// use keygate_web::ctx::resolver::mw_ctx_resolver;
///
/// let tokens = TokenAuthority::new(b"secret");
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(tokens, mw_ctx_resolver));
/// ```
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(tokens): State<TokenAuthority>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let claims = cookies
        .get(AUTH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| bearer_token(&headers))
        .ok_or(keygate_auth::error::Error::TokenMissing)
        .and_then(|token| tokens.verify(&token));

    if let Err(ref err) = claims {
        debug!("Context resolution failed: {err}");
        cookies.remove(Cookie::from(AUTH_TOKEN_COOKIE));
    }

    let ctx = claims.map(|claims| Ctx::new(claims.sub, claims.username));
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Extracts the bearer token from the `Authorization` header.
///
/// Accepts both `Bearer <token>` and a bare token, since some clients
/// send the token without a scheme.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTH_HEADER)?.to_str().ok()?;
    let token = value.strip_prefix(AUTH_HEADER_PREFIX).unwrap_or(value).trim();
    if token.is_empty() {
        return None;
    }
    Some(String::from(token))
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, keygate_auth::error::Error>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_strips_scheme_prefix() {
        assert_eq!(
            bearer_token(&headers("Bearer abc.def.ghi")),
            Some(String::from("abc.def.ghi"))
        );
    }

    #[test]
    fn bearer_token_accepts_bare_token() {
        assert_eq!(
            bearer_token(&headers("abc.def.ghi")),
            Some(String::from("abc.def.ghi"))
        );
    }

    #[test]
    fn bearer_token_rejects_missing_or_empty_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
    }
}
