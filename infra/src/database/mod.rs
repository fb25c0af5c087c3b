//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Schema bootstrap for the `users` and `refresh_tokens` tables

pub mod connection;
pub mod schema;


pub use connection::{DatabasePool, PoolStatistics};
pub use schema::ensure_schema;
