/// Patient record
pub mod model;

/// Input DTOs
pub mod inputs;

/// Response views
pub mod view;

pub use inputs::{NewPatient, PatientChanges};
pub use model::{Gender, Patient, ENTITY};
pub use view::PatientSummary;
