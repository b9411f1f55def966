//! Domain models persisted by the store

pub mod finca;

pub use finca::{Finca, NewFinca};
