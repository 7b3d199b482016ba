//! Database models and ORM layer for keygate.
//!
//! Provides the Diesel-based credential store and connection management.
//! The store owns user records exclusively; uniqueness of usernames is
//! enforced by the database itself so concurrent registrations cannot
//! race past an existence check.
//!
//! # Usage
//!
//! ```rust,no_run
//! use keygate_models::{
//!     db::{config::DbConfig, connection::DbConnection},
//!     user::User,
//! };
//!
//! let config = DbConfig::from_env();
//! let db = DbConnection::new(&config).setup();
//!
//! let user = User::fetch_by_username("alice", &db).unwrap();
//! ```

pub mod db;
pub mod error;
pub mod prelude;
mod schema;
pub mod user;
