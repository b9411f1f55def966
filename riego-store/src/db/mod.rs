//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, never a shared `Arc<Mutex<Connection>>`
//! - One pooled connection per operation, released on drop
//! - One parameterized statement per operation, values always bound
//! - Rows mapped by column name over an explicit column list

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_from_config, create_pool_with_options};
pub use repos::*;
