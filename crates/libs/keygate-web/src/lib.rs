//! Web framework utilities and middleware for keygate.
//!
//! This library provides the auth flows (register/login), request
//! context resolution from bearer tokens, route-guard middleware and
//! the client-facing error mapping used by the keygate HTTP service.

pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod prelude;
pub mod user;
