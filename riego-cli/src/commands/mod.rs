//! Command implementations for the riego CLI

pub mod config;
pub mod finca;
pub mod migrate;

// Re-export main dispatcher functions for flat access from main.rs
pub use config::run_config;
pub use finca::run_finca;
pub use migrate::run_migrate;
