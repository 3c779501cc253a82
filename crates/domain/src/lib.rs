//! Patient & Medication Domain Models

/// Patient records
pub mod patients;

/// Medication records
pub mod medications;

/// Persistence
pub mod store;

/// Domain errors
pub mod errors;

pub use errors::Error;
pub use store::{SqliteStore, Store};
