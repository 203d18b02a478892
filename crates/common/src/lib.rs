//! Common types and errors shared across the Secure Cell workspace crates.

pub mod armor;
pub mod error;

pub use armor::{armor, dearmor, ArmorError};
pub use error::CellError;
