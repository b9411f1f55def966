//! Repository implementations for database access
//!
//! Each repository borrows the pool and holds no other state, so every call
//! round-trips to storage.

pub mod fincas;

pub use fincas::FincaRepo;
