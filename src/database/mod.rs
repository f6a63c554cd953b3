//! SQLite persistence: connection management and record models.

pub mod connection;
pub mod models;
