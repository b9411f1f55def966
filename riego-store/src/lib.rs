//! riego-store: PostgreSQL persistence for farm (finca) records
//!
//! A stateless repository over a `sqlx` pool. Each operation borrows one
//! pooled connection, runs one parameterized statement and maps the rows
//! into [`Finca`] values by column name.

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::StoreConfig;
pub use db::FincaRepo;
pub use error::{DbError, DbResult};
pub use models::{Finca, NewFinca};
