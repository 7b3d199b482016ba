//! Database configuration and connection management.

pub mod config;
pub mod connection;
