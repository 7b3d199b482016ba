//! Request context management for web handlers.
//!
//! This module provides the session context derived from a verified
//! bearer token. The context lives for exactly one request and carries
//! only what downstream handlers need: who the caller is.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod resolver;

/// The authenticated subject of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtxUser {
    /// The unique user ID.
    pub id: Uuid,
    /// The username.
    pub username: String,
}

/// Request context containing authentication information.
#[derive(Clone, Debug)]
pub struct Ctx {
    /// The authenticated user.
    pub user: CtxUser,
}

impl Ctx {
    /// Creates a new request context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygate_web::ctx::Ctx;
    /// use uuid::Uuid;
    ///
    /// let ctx = Ctx::new(Uuid::new_v4(), String::from("alice"));
    /// assert_eq!(ctx.user.username, "alice");
    /// ```
    pub fn new(id: Uuid, username: String) -> Self {
        Self {
            user: CtxUser { id, username },
        }
    }
}
